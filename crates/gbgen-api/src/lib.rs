//! GrowthBook Features API access for gbgen.
//!
//! Talks to the GrowthBook REST API and assembles the sorted feature catalog
//! that code generation works from.
//!
//! # Architecture
//!
//! - [`FeaturesApi`]: the narrow async capability the rest of gbgen uses
//! - [`HttpFeaturesApi`]: bearer-authenticated HTTP implementation
//! - [`MetadataFetcher`]: pagination, filtering, and sorting of the catalog
//! - `FakeFeaturesApi` (feature `fake`): scripted in-memory implementation

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod client;
mod fetcher;
mod types;

#[cfg(any(test, feature = "fake"))]
mod fake;

pub use client::{API_PREFIX, FeaturesApi, HttpFeaturesApi, normalize_base_url};
#[cfg(any(test, feature = "fake"))]
pub use fake::FakeFeaturesApi;
pub use fetcher::{MetadataFetcher, PAGE_SIZE};
pub use types::{Feature, FeatureEnvironment, GetFeatureResponse, ListFeaturesResponse};
