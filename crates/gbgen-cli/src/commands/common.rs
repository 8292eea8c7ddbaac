//! Common utilities shared across CLI commands.
//!
//! Config loading with command-line overrides, cancellation wiring, and
//! error-to-exit-code mapping.

use anyhow::{Context, Result};
use clap::Args;
use gbgen_core::cli::ExitCode;
use gbgen_core::config::{self, Config, LoadOptions, Overrides};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Command-line overrides for config values.
///
/// Every flag is optional; a flag that is present beats the environment and
/// the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// GrowthBook API host (e.g. <https://api.growthbook.io>)
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// GrowthBook secret API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Restrict the catalog to one project
    #[arg(long)]
    pub project_id: Option<String>,

    /// Directory that receives features.gen.go
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Go package name of the generated file
    #[arg(long)]
    pub package_name: Option<String>,

    /// Emit typed wrappers instead of plain key constants
    #[arg(long, value_name = "BOOL")]
    pub typed: Option<bool>,

    /// Also emit an ordered FeatureList
    #[arg(long, value_name = "BOOL")]
    pub feature_list: Option<bool>,
}

impl From<ConfigArgs> for Overrides {
    fn from(args: ConfigArgs) -> Self {
        Self {
            api_base_url: args.api_base_url,
            api_key: args.api_key,
            project_id: args.project_id,
            output_dir: args.output_dir,
            package_name: args.package_name,
            emit_typed_features: args.typed,
            emit_feature_list: args.feature_list,
        }
    }
}

/// Loads and validates the effective config.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if validation
/// reports any problem.
///
/// # Examples
///
/// ```
/// use gbgen_cli::ConfigArgs;
/// use gbgen_cli::commands::common::load_config;
///
/// let args = ConfigArgs {
///     api_key: Some("secret_abc".to_string()),
///     package_name: Some("flags".to_string()),
///     ..Default::default()
/// };
/// let config = load_config(None, args).unwrap();
/// assert_eq!(config.generator.package_name, "flags");
/// ```
pub fn load_config(config_path: Option<PathBuf>, args: ConfigArgs) -> Result<Config> {
    let options = LoadOptions {
        config_path,
        env_prefix: config::DEFAULT_ENV_PREFIX.to_string(),
        overrides: args.into(),
    };

    let config = config::load(&options).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    debug!(config = ?config, "Effective configuration");
    Ok(config)
}

/// Creates a token that is cancelled on Ctrl-C or once `timeout` elapses.
///
/// Must be called from within a Tokio runtime.
#[must_use]
pub fn cancellation_token(timeout: Option<Duration>) -> CancellationToken {
    let token = CancellationToken::new();

    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    if let Some(timeout) = timeout {
        let on_timeout = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(timeout) => {
                    warn!("Timed out after {}s, cancelling", timeout.as_secs());
                    on_timeout.cancel();
                }
                () = on_timeout.cancelled() => {}
            }
        });
    }

    token
}

/// Maps a command failure to the process exit code.
///
/// The first [`gbgen_core::Error`] in the context chain decides; anything
/// else is a generic error.
///
/// # Examples
///
/// ```
/// use anyhow::Context;
/// use gbgen_cli::commands::common::exit_code_for;
/// use gbgen_core::Error;
/// use gbgen_core::cli::ExitCode;
///
/// let err: Result<(), Error> = Err(Error::Cancelled { operation: "generate".into() });
/// let err = err.context("generation failed").unwrap_err();
/// assert_eq!(exit_code_for(&err), ExitCode::TIMEOUT);
/// ```
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<gbgen_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbgen_core::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_from_args() {
        let overrides: Overrides = ConfigArgs {
            project_id: Some("prj_1".to_string()),
            typed: Some(true),
            feature_list: Some(false),
            ..Default::default()
        }
        .into();

        assert_eq!(overrides.project_id.as_deref(), Some("prj_1"));
        assert_eq!(overrides.emit_typed_features, Some(true));
        assert_eq!(overrides.emit_feature_list, Some(false));
        assert!(overrides.api_key.is_none());
    }

    #[test]
    fn test_load_config_file_then_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gbgen.yaml");
        fs::write(
            &path,
            "growthbook:\n  apiKey: secret_file\ngenerator:\n  packageName: fromfile\n  emitTypedFeatures: true\n",
        )
        .unwrap();

        let config = load_config(
            Some(path),
            ConfigArgs {
                package_name: Some("fromflag".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.generator.package_name, "fromflag");
        assert!(config.generator.emit_typed_features);
    }

    #[test]
    fn test_load_config_invalid_maps_to_invalid_input() {
        let err = load_config(
            None,
            ConfigArgs {
                api_key: Some("secret".to_string()),
                package_name: Some("not-a-package".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
        assert!(format!("{err:#}").contains("generator.packageName must be a valid Go package name"));
    }

    #[test]
    fn test_exit_code_for_api_error() {
        let err = anyhow::Error::new(Error::ApiError {
            operation: "list features".to_string(),
            status: Some(401),
            message: "Unauthorized".to_string(),
            source: None,
        });
        assert_eq!(exit_code_for(&err), ExitCode::SERVER_ERROR);
    }

    #[test]
    fn test_exit_code_for_foreign_error() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(exit_code_for(&err), ExitCode::ERROR);
    }

    #[tokio::test]
    async fn test_timeout_cancels_token() {
        let token = cancellation_token(Some(Duration::from_millis(10)));
        tokio::time::timeout(Duration::from_secs(5), token.cancelled())
            .await
            .unwrap();
        assert!(token.is_cancelled());
    }
}
