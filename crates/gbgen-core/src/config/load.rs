//! Layered configuration loading.
//!
//! Precedence, highest wins: explicit overrides > environment > config file >
//! defaults. Loading does not validate; call [`Config::validate`] afterwards.

use super::{Config, Format};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix used when none is configured.
pub const DEFAULT_ENV_PREFIX: &str = "GBGEN";

/// Explicit values (typically CLI flags). `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `growthbook.apiBaseURL`
    pub api_base_url: Option<String>,
    /// `growthbook.apiKey`
    pub api_key: Option<String>,
    /// `growthbook.projectID`
    pub project_id: Option<String>,
    /// `generator.outputDir`
    pub output_dir: Option<String>,
    /// `generator.packageName`
    pub package_name: Option<String>,
    /// `generator.emitTypedFeatures`
    pub emit_typed_features: Option<bool>,
    /// `generator.emitFeatureList`
    pub emit_feature_list: Option<bool>,
}

/// Inputs of [`load`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Config file to read; skipped when `None`
    pub config_path: Option<PathBuf>,
    /// Prefix of environment variables; [`DEFAULT_ENV_PREFIX`] when blank
    pub env_prefix: String,
    /// Highest-precedence values
    pub overrides: Overrides,
}

/// Config file contents. Every field is optional so that a file only
/// overrides what it mentions, including explicit `false` values.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    growthbook: FileGrowthBook,
    generator: FileGenerator,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileGrowthBook {
    #[serde(rename = "apiBaseURL")]
    api_base_url: Option<String>,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
    #[serde(rename = "projectID")]
    project_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileGenerator {
    #[serde(rename = "outputDir")]
    output_dir: Option<String>,
    #[serde(rename = "packageName")]
    package_name: Option<String>,
    #[serde(rename = "emitTypedFeatures")]
    emit_typed_features: Option<bool>,
    #[serde(rename = "emitFeatureList")]
    emit_feature_list: Option<bool>,
}

/// Builds the final config from defaults, file, process environment, and
/// overrides.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the config file cannot be read and
/// [`Error::ConfigError`] if its extension is unsupported or it fails to
/// parse.
pub fn load(options: &LoadOptions) -> Result<Config> {
    load_with_env(options, |key| std::env::var(key).ok())
}

/// Like [`load`], reading environment variables through `lookup`.
///
/// # Errors
///
/// Same as [`load`].
///
/// # Examples
///
/// ```
/// use gbgen_core::config::{LoadOptions, Overrides, load_with_env};
///
/// let options = LoadOptions {
///     overrides: Overrides {
///         package_name: Some("flags".to_string()),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let config = load_with_env(&options, |key| {
///     (key == "GBGEN_API_KEY").then(|| "secret_env".to_string())
/// })
/// .unwrap();
/// assert_eq!(config.growthbook.api_key, "secret_env");
/// assert_eq!(config.generator.package_name, "flags");
/// ```
pub fn load_with_env<F>(options: &LoadOptions, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(path) = &options.config_path {
        let file = read_file(path)?;
        merge_file(&mut config, file);
        tracing::debug!("Loaded config file {}", path.display());
    }

    apply_env(&mut config, &options.env_prefix, lookup);
    apply_overrides(&mut config, &options.overrides);

    Ok(config)
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let format = Format::from_path(path).ok_or_else(|| Error::ConfigError {
        message: format!(
            "unsupported config extension for {} (expected .json/.yaml/.yml/.toml)",
            path.display()
        ),
    })?;
    let contents = std::fs::read_to_string(path).map_err(|source| Error::IoError {
        path: path.display().to_string(),
        source,
    })?;
    format.unmarshal(&contents)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn merge_file(config: &mut Config, file: FileConfig) {
    let FileConfig {
        growthbook,
        generator,
    } = file;

    if let Some(v) = non_empty(growthbook.api_base_url) {
        config.growthbook.api_base_url = v;
    }
    if let Some(v) = non_empty(growthbook.api_key) {
        config.growthbook.api_key = v;
    }
    // A present projectID is kept even when empty; blank means no filter.
    if let Some(v) = growthbook.project_id {
        config.growthbook.project_id = Some(v);
    }
    if let Some(v) = non_empty(generator.output_dir) {
        config.generator.output_dir = v;
    }
    if let Some(v) = non_empty(generator.package_name) {
        config.generator.package_name = v;
    }
    if let Some(v) = generator.emit_typed_features {
        config.generator.emit_typed_features = v;
    }
    if let Some(v) = generator.emit_feature_list {
        config.generator.emit_feature_list = v;
    }
}

fn apply_env<F>(config: &mut Config, prefix: &str, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = match prefix.trim() {
        "" => DEFAULT_ENV_PREFIX,
        p => p,
    };
    let var = |name: &str| non_empty(lookup(&format!("{prefix}_{name}")));

    if let Some(v) = var("API_BASE_URL") {
        config.growthbook.api_base_url = v;
    }
    if let Some(v) = var("API_KEY") {
        config.growthbook.api_key = v;
    }
    if let Some(v) = var("PROJECT_ID") {
        config.growthbook.project_id = Some(v);
    }
    if let Some(v) = var("OUTPUT_DIR") {
        config.generator.output_dir = v;
    }
    if let Some(v) = var("PACKAGE_NAME") {
        config.generator.package_name = v;
    }
    if let Some(v) = var("EMIT_TYPED_FEATURES").and_then(|v| parse_bool(&v)) {
        config.generator.emit_typed_features = v;
    }
    if let Some(v) = var("EMIT_FEATURE_LIST").and_then(|v| parse_bool(&v)) {
        config.generator.emit_feature_list = v;
    }
}

fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(v) = &overrides.api_base_url {
        config.growthbook.api_base_url.clone_from(v);
    }
    if let Some(v) = &overrides.api_key {
        config.growthbook.api_key.clone_from(v);
    }
    if let Some(v) = &overrides.project_id {
        config.growthbook.project_id = Some(v.clone());
    }
    if let Some(v) = &overrides.output_dir {
        config.generator.output_dir.clone_from(v);
    }
    if let Some(v) = &overrides.package_name {
        config.generator.package_name.clone_from(v);
    }
    if let Some(v) = overrides.emit_typed_features {
        config.generator.emit_typed_features = v;
    }
    if let Some(v) = overrides.emit_feature_list {
        config.generator.emit_feature_list = v;
    }
}

/// Parses the boolean spellings accepted by Go's `strconv.ParseBool`.
/// Anything else is ignored by the caller.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
