//! Config file formats.

use super::Config;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Serialization format of a config file.
///
/// # Examples
///
/// ```
/// use gbgen_core::config::Format;
/// use std::path::Path;
///
/// assert_eq!(Format::from_path(Path::new("gbgen.toml")), Some(Format::Toml));
/// assert_eq!(Format::from_path(Path::new("gbgen.YML")), Some(Format::Yaml));
/// assert_eq!(Format::from_path(Path::new("gbgen.ini")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl Format {
    /// Detects the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Resolves the format for writing a new config file.
    ///
    /// An explicit override wins; otherwise the extension decides, falling
    /// back to YAML when it is missing or unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the override names an unknown format.
    pub fn detect(path: &Path, override_format: Option<&str>) -> Result<Self> {
        match override_format.map(str::trim).filter(|f| !f.is_empty()) {
            Some(explicit) => explicit.parse(),
            None => Ok(Self::from_path(path).unwrap_or(Self::Yaml)),
        }
    }

    /// Returns the canonical name of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// Serializes a config in this format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the serializer fails.
    pub fn marshal(self, config: &Config) -> Result<String> {
        let encoded = match self {
            Self::Json => serde_json::to_string_pretty(config)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| serialization_error(self, e)),
            Self::Yaml => serde_yaml::to_string(config).map_err(|e| serialization_error(self, e)),
            Self::Toml => toml::to_string(config).map_err(|e| serialization_error(self, e)),
        }?;
        Ok(encoded)
    }

    /// Parses `input` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the parse failure.
    pub fn unmarshal<T: DeserializeOwned>(self, input: &str) -> Result<T> {
        let parsed = match self {
            Self::Json => serde_json::from_str(input).map_err(|e| parse_error(self, &e)),
            Self::Yaml => serde_yaml::from_str(input).map_err(|e| parse_error(self, &e)),
            Self::Toml => toml::from_str(input).map_err(|e| parse_error(self, &e)),
        }?;
        Ok(parsed)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::ConfigError {
                message: format!("unsupported format {s:?} (expected json|yaml|toml)"),
            }),
        }
    }
}

fn serialization_error<E>(format: Format, err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::SerializationError {
        message: format!("failed to encode {format} config: {err}"),
        source: Some(Box::new(err)),
    }
}

fn parse_error(format: Format, err: &dyn fmt::Display) -> Error {
    Error::ConfigError {
        message: format!("parse {format} config: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_prefers_override() {
        let path = PathBuf::from("gbgen.json");
        assert_eq!(Format::detect(&path, Some("toml")).unwrap(), Format::Toml);
        assert_eq!(Format::detect(&path, None).unwrap(), Format::Json);
        assert_eq!(Format::detect(&path, Some("  ")).unwrap(), Format::Json);
    }

    #[test]
    fn test_detect_defaults_to_yaml() {
        assert_eq!(Format::detect(Path::new("gbgen"), None).unwrap(), Format::Yaml);
        assert_eq!(
            Format::detect(Path::new("gbgen.conf"), None).unwrap(),
            Format::Yaml
        );
    }

    #[test]
    fn test_detect_rejects_unknown_override() {
        let err = Format::detect(Path::new("gbgen.yaml"), Some("xml")).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_every_format_reads_back_the_sample() {
        let sample = Config::sample();
        for format in [Format::Json, Format::Yaml, Format::Toml] {
            let encoded = format.marshal(&sample).unwrap();
            let decoded: Config = format.unmarshal(&encoded).unwrap();
            assert_eq!(decoded, sample, "format {format}");
        }
    }

    #[test]
    fn test_marshal_uses_camel_case_keys() {
        let encoded = Format::Yaml.marshal(&Config::sample()).unwrap();
        assert!(encoded.contains("apiBaseURL: https://api.growthbook.io"));
        assert!(encoded.contains("packageName: growthbooktypes"));
        assert!(encoded.contains("emitTypedFeatures: false"));
    }

    #[test]
    fn test_unmarshal_reports_format() {
        let err = Format::Json.unmarshal::<Config>("{not json").unwrap_err();
        assert!(err.to_string().contains("parse json config"));
    }
}
