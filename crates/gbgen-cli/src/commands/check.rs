//! Check command implementation.
//!
//! Validates the config and verifies that the API accepts the credentials
//! by listing feature keys.

use super::common::{ConfigArgs, cancellation_token, load_config};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use gbgen_codegen::Generator;
use gbgen_core::BuildInfo;
use gbgen_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Result of a successful check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Configured API host
    pub api_base_url: String,
    /// Project filter, if any
    pub project_id: Option<String>,
    /// Number of feature keys visible with these credentials
    pub feature_keys: usize,
}

/// Runs the check command.
///
/// # Errors
///
/// Returns an error if the config is invalid, the API rejects the request,
/// or the call is cancelled.
pub async fn run(
    config_path: Option<PathBuf>,
    args: ConfigArgs,
    timeout: Option<Duration>,
    build_info: &BuildInfo,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let config = load_config(config_path, args)?;
    let generator = Generator::new(&config, build_info.clone())
        .context("failed to create API client")?;
    let cancel = cancellation_token(timeout);

    let feature_keys = generator
        .check(&cancel)
        .await
        .context("GrowthBook API check failed")?;

    let summary = CheckSummary {
        api_base_url: config.growthbook.api_base_url.clone(),
        project_id: config.growthbook.project_id.clone(),
        feature_keys,
    };
    println!("{}", format_output(&summary, output_format)?);
    Ok(ExitCode::SUCCESS)
}
