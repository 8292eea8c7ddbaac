//! Go source generation for GrowthBook feature catalogs.
//!
//! Turns the sorted catalog produced by `gbgen-api` into a single
//! gofmt-canonical Go file, either plain `FeatureKey` constants or typed
//! wrapper variables, using Handlebars templates.
//!
//! # Examples
//!
//! ```
//! use gbgen_codegen::{Renderer, naming::synthesize};
//! use gbgen_core::{BuildInfo, FeatureMeta, ValueType};
//!
//! let named = synthesize(&[FeatureMeta::new("checkout-redesign", ValueType::Boolean)]);
//! let renderer = Renderer::new(BuildInfo::new("v1.0.0")).unwrap();
//! let source = String::from_utf8(renderer.render_keys("flags", &named, false).unwrap()).unwrap();
//!
//! assert!(source.contains("FeatureCheckoutRedesign FeatureKey = \"checkout-redesign\""));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod generator;
pub mod golang;
pub mod naming;
pub mod renderer;
pub mod template_engine;
pub mod types;

pub use generator::{Generator, OUTPUT_FILE_NAME};
pub use renderer::Renderer;
