//! Output formatters for CLI commands.
//!
//! Command summaries are flat records. JSON mode prints them verbatim. Text
//! mode prints `key: value` lines in key order for scripts, and pretty mode
//! aligns and colorizes the same lines for terminals.

use anyhow::Result;
use colored::Colorize;
use gbgen_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use gbgen_cli::formatters::format_output;
/// use gbgen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     path: String,
///     bytes: usize,
/// }
///
/// let summary = Summary {
///     path: "internal/flags/features.gen.go".to_string(),
///     bytes: 512,
/// };
///
/// let output = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(output, "bytes: 512\npath: internal/flags/features.gen.go");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Flattens a serialized record into `(key, value)` pairs sorted by key.
///
/// Top-level scalars become a single pair with an empty key.
fn fields<T: Serialize>(data: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(data)?;
    Ok(match value {
        serde_json::Value::Object(map) => {
            let mut pairs: Vec<_> = map
                .into_iter()
                .map(|(key, value)| (key, scalar(&value)))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            pairs
        }
        other => vec![(String::new(), scalar(&other))],
    })
}

fn scalar(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, fields};

    /// Format data as `key: value` lines without colors.
    ///
    /// Suitable for piping to other commands or scripts.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(fields(data)?
            .into_iter()
            .map(|(key, value)| {
                if key.is_empty() {
                    value
                } else {
                    format!("{key}: {value}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, fields};

    /// Format data as aligned, colorized lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let fields = fields(data)?;
        let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

        Ok(fields
            .into_iter()
            .map(|(key, value)| {
                let value = match value.as_str() {
                    "true" => value.green().to_string(),
                    "false" | "-" => value.dimmed().to_string(),
                    _ => value.cyan().to_string(),
                };
                if key.is_empty() {
                    value
                } else {
                    let label = format!("{:<width$}", format!("{key}:"), width = width + 1);
                    format!("{} {value}", label.bold())
                }
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestSummary {
        path: Option<String>,
        bytes: usize,
        feature_list: bool,
        environments: Vec<String>,
    }

    fn summary() -> TestSummary {
        TestSummary {
            path: None,
            bytes: 42,
            feature_list: true,
            environments: vec!["dev".to_string(), "production".to_string()],
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&summary()).unwrap();
        assert!(output.contains("\"bytes\": 42"));
        assert!(output.contains("\"path\": null"));
    }

    #[test]
    fn test_text_format() {
        let output = text::format(&summary()).unwrap();
        assert_eq!(
            output,
            "bytes: 42\nenvironments: dev, production\nfeature_list: true\npath: -"
        );
    }

    #[test]
    fn test_text_format_scalar() {
        assert_eq!(text::format(&"gbgen v1.0.0").unwrap(), "gbgen v1.0.0");
    }

    #[test]
    fn test_pretty_format_aligns_keys() {
        colored::control::set_override(false);
        let output = pretty::format(&summary()).unwrap();
        colored::control::unset_override();

        assert!(output.contains("bytes:        42"));
        assert!(output.contains("feature_list: true"));
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = summary();
        assert!(format_output(&data, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(format_output(&data, OutputFormat::Text).unwrap().starts_with("bytes: 42"));
        assert!(format_output(&data, OutputFormat::Pretty).unwrap().contains("42"));
    }
}
