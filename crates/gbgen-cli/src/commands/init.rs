//! Init command implementation.
//!
//! Writes a sample config file with a placeholder API key.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use gbgen_core::cli::{ExitCode, OutputFormat};
use gbgen_core::config::{Config, Format};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default path of the sample config.
pub const DEFAULT_CONFIG_PATH: &str = "gbgen.yaml";

/// Result of writing the sample config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitSummary {
    /// Written file
    pub path: String,
    /// Serialization format used
    pub format: String,
}

/// Runs the init command.
///
/// # Errors
///
/// Returns an error if the format is unknown or the file cannot be written.
pub async fn run(
    out: PathBuf,
    format: Option<String>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let summary = write_sample(&out, format.as_deref())?;
    println!("{}", format_output(&summary, output_format)?);
    Ok(ExitCode::SUCCESS)
}

/// Serializes [`Config::sample`] to `path`, overwriting any existing file.
///
/// The format comes from `format` when given, otherwise from the file
/// extension, falling back to YAML.
///
/// # Errors
///
/// Returns an error if the format is unknown or the file cannot be written.
pub fn write_sample(path: &Path, format: Option<&str>) -> Result<InitSummary> {
    let format = Format::detect(path, format)?;
    let encoded = format.marshal(&Config::sample())?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    std::fs::write(path, encoded)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("Wrote sample {} config to {}", format, path.display());
    Ok(InitSummary {
        path: path.display().to_string(),
        format: format.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbgen_core::config::{LoadOptions, load_with_env};
    use tempfile::TempDir;

    fn reload(path: PathBuf) -> Config {
        let options = LoadOptions {
            config_path: Some(path),
            ..Default::default()
        };
        load_with_env(&options, |_| None).unwrap()
    }

    #[test]
    fn test_write_sample_round_trips_each_format() {
        let dir = TempDir::new().unwrap();
        for name in ["gbgen.yaml", "gbgen.json", "gbgen.toml"] {
            let path = dir.path().join(name);
            write_sample(&path, None).unwrap();
            assert_eq!(reload(path), Config::sample(), "{name}");
        }
    }

    #[test]
    fn test_write_sample_format_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gbgen.conf");

        let summary = write_sample(&path, Some("json")).unwrap();

        assert_eq!(summary.format, "json");
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.trim_start().starts_with('{'));
        assert!(written.contains("\"apiBaseURL\""));
    }

    #[test]
    fn test_write_sample_unknown_extension_defaults_to_yaml() {
        let dir = TempDir::new().unwrap();
        let summary = write_sample(&dir.path().join("gbgen"), None).unwrap();
        assert_eq!(summary.format, "yaml");
    }

    #[test]
    fn test_write_sample_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("configs").join("gbgen.toml");
        write_sample(&path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_sample_rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        assert!(write_sample(&dir.path().join("gbgen.yaml"), Some("ini")).is_err());
    }
}
