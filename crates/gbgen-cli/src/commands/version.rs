//! Version command implementation.

use anyhow::Result;
use gbgen_core::BuildInfo;
use gbgen_core::cli::{ExitCode, OutputFormat};

use crate::formatters::format_output;

/// Prints `gbgen <version>`, with the commit when known.
///
/// Pretty and text output keep the plain one-line form for scripting; JSON
/// output serializes the build info.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(build_info: &BuildInfo, output_format: OutputFormat) -> Result<ExitCode> {
    println!("{}", render(build_info, output_format)?);
    Ok(ExitCode::SUCCESS)
}

/// Formats the version line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(build_info: &BuildInfo, output_format: OutputFormat) -> Result<String> {
    match output_format {
        OutputFormat::Json => format_output(build_info, output_format),
        OutputFormat::Text | OutputFormat::Pretty => Ok(build_info.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let info = BuildInfo::new("v1.4.0");
        assert_eq!(render(&info, OutputFormat::Pretty).unwrap(), "gbgen v1.4.0");
    }

    #[test]
    fn test_render_with_commit() {
        let info = BuildInfo {
            version: "v1.4.0".to_string(),
            commit: Some("deadbee".to_string()),
        };
        assert_eq!(render(&info, OutputFormat::Text).unwrap(), "gbgen v1.4.0 (deadbee)");
    }

    #[test]
    fn test_render_json() {
        let output = render(&BuildInfo::new("v1.4.0"), OutputFormat::Json).unwrap();
        assert!(output.contains("\"version\": \"v1.4.0\""));
    }
}
