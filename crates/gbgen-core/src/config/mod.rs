//! Configuration for gbgen.
//!
//! The merged configuration has two sections: how to reach GrowthBook and
//! what to generate. It is read from JSON, YAML, or TOML files, environment
//! variables, and explicit overrides (see [`load`]).
//!
//! # Examples
//!
//! ```
//! use gbgen_core::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.growthbook.api_base_url, "https://api.growthbook.io");
//! assert_eq!(config.generator.package_name, "growthbooktypes");
//! assert!(!config.generator.emit_typed_features);
//! ```

mod codec;
mod load;
mod validate;

pub use codec::Format;
pub use load::{DEFAULT_ENV_PREFIX, LoadOptions, Overrides, load, load_with_env};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default GrowthBook API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.growthbook.io";

/// Default directory the generated file is written to.
pub const DEFAULT_OUTPUT_DIR: &str = "./internal/growthbooktypes";

/// Default Go package name of the generated file.
pub const DEFAULT_PACKAGE_NAME: &str = "growthbooktypes";

/// The single merged configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GrowthBook connection settings
    pub growthbook: GrowthBookConfig,
    /// Code generation settings
    pub generator: GeneratorConfig,
}

impl Config {
    /// Returns a config suitable for `gbgen init`, with a placeholder API key.
    #[must_use]
    pub fn sample() -> Self {
        let mut config = Self::default();
        config.growthbook.api_key = "secret_***".to_string();
        config
    }
}

/// How to reach the GrowthBook API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthBookConfig {
    /// API host, with or without the `/api/v1` suffix
    #[serde(rename = "apiBaseURL")]
    pub api_base_url: String,

    /// Secret API key sent as a bearer token
    #[serde(rename = "apiKey")]
    pub api_key: String,

    /// Restricts the catalog to one project
    #[serde(rename = "projectID", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Default for GrowthBookConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            project_id: None,
        }
    }
}

impl fmt::Debug for GrowthBookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("GrowthBookConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &api_key)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// What to generate and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory that receives `features.gen.go`
    #[serde(rename = "outputDir")]
    pub output_dir: String,

    /// Go package name of the generated file
    #[serde(rename = "packageName")]
    pub package_name: String,

    /// Emit typed wrappers instead of plain key constants
    #[serde(rename = "emitTypedFeatures")]
    pub emit_typed_features: bool,

    /// Also emit an ordered `FeatureList`
    #[serde(rename = "emitFeatureList")]
    pub emit_feature_list: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            emit_typed_features: false,
            emit_feature_list: false,
        }
    }
}
