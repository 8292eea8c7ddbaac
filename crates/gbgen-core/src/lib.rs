//! Core types, configuration, and errors for gbgen.
//!
//! This crate provides the foundational types shared by the API client, the
//! Go code generator, and the CLI.
//!
//! # Architecture
//!
//! The core consists of:
//! - Catalog types (`FeatureMeta`, `ValueType`, `NamedFeature`)
//! - Error hierarchy with contextual information
//! - Layered configuration (file, environment, overrides) and validation
//! - Go identifier rules and build metadata

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod build_info;
mod error;
mod types;

pub mod cli;
pub mod config;
pub mod ident;

pub use build_info::BuildInfo;
pub use error::{Error, Result};
pub use types::{FeatureMeta, NamedFeature, ValueType, sort_catalog};
