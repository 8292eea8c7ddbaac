//! Generate command implementation.
//!
//! Fetches the feature catalog and writes `features.gen.go`:
//! 1. Loads and validates the config (file, environment, flags)
//! 2. Runs the generator under a cancellable token
//! 3. Replaces the output file atomically, or prints to stdout

use super::common::{ConfigArgs, cancellation_token, load_config};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use gbgen_codegen::{Generator, OUTPUT_FILE_NAME};
use gbgen_core::BuildInfo;
use gbgen_core::cli::{ExitCode, OutputFormat};
use gbgen_core::config::Config;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Written file, absent when printing to stdout
    pub path: Option<String>,
    /// Size of the generated source
    pub bytes: usize,
    /// `keys` or `typed`
    pub mode: String,
    /// Whether `FeatureList` was emitted
    pub feature_list: bool,
    /// Go package name
    pub package_name: String,
}

/// Options of the generate command besides config overrides.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Config file path
    pub config_path: Option<PathBuf>,
    /// Cancel the run after this long
    pub timeout: Option<Duration>,
    /// Print the source instead of writing the file
    pub stdout: bool,
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if the config is invalid, the API call fails, the run
/// is cancelled, rendering fails, or the file cannot be written.
///
/// # Examples
///
/// ```no_run
/// use gbgen_cli::ConfigArgs;
/// use gbgen_cli::commands::generate::{self, GenerateOptions};
/// use gbgen_core::BuildInfo;
/// use gbgen_core::cli::{ExitCode, OutputFormat};
///
/// # async fn example() -> anyhow::Result<()> {
/// let code = generate::run(
///     GenerateOptions::default(),
///     ConfigArgs::default(),
///     &BuildInfo::current(),
///     OutputFormat::Pretty,
/// )
/// .await?;
/// assert_eq!(code, ExitCode::SUCCESS);
/// # Ok(())
/// # }
/// ```
pub async fn run(
    options: GenerateOptions,
    args: ConfigArgs,
    build_info: &BuildInfo,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let config = load_config(options.config_path, args)?;
    let generator = Generator::new(&config, build_info.clone())
        .context("failed to create generator")?;
    let cancel = cancellation_token(options.timeout);

    let summary = execute(&generator, &config, options.stdout, &cancel).await?;

    if !options.stdout {
        println!("{}", format_output(&summary, output_format)?);
    }
    Ok(ExitCode::SUCCESS)
}

/// Generates the source and delivers it to the configured destination.
///
/// # Errors
///
/// Returns generation errors and I/O errors, with context.
pub async fn execute(
    generator: &Generator,
    config: &Config,
    stdout: bool,
    cancel: &CancellationToken,
) -> Result<GenerationSummary> {
    let source = generator
        .generate(cancel)
        .await
        .context("generation failed")?;

    let path = if stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(&source)
            .and_then(|()| out.flush())
            .context("failed to write to stdout")?;
        None
    } else {
        let path = write_atomic(Path::new(&config.generator.output_dir), &source)?;
        info!("Wrote {}", path.display());
        Some(path.display().to_string())
    };

    let generator_config = &config.generator;
    Ok(GenerationSummary {
        path,
        bytes: source.len(),
        mode: if generator_config.emit_typed_features { "typed" } else { "keys" }.to_string(),
        feature_list: generator_config.emit_feature_list,
        package_name: generator_config.package_name.clone(),
    })
}

/// Replaces `<dir>/features.gen.go` with `contents`.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written or renamed.
pub fn write_atomic(dir: &Path, contents: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let target = dir.join(OUTPUT_FILE_NAME);
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .context("failed to write generated source")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .context("failed to set file permissions")?;
    }

    tmp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to replace {}", target.display()))?;
    Ok(target)
}
