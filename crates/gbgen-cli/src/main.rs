//! gbgen command-line interface.
//!
//! Generates Go identifiers for GrowthBook feature flags.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Fetch the catalog and write `features.gen.go`
//! - `check` - Verify config and API credentials
//! - `feature` - Show one feature and its identifier
//! - `init` - Write a sample config file
//! - `version` - Print build information
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Write a sample config, then generate
//! gbgen init --out gbgen.yaml
//! GBGEN_API_KEY=secret_xxx gbgen --config gbgen.yaml generate
//!
//! # Typed wrappers with a feature list, printed instead of written
//! gbgen generate --typed true --feature-list true --stdout
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use gbgen_cli::ConfigArgs;
use gbgen_cli::commands::{
    self, common::exit_code_for, generate::GenerateOptions, init::DEFAULT_CONFIG_PATH,
};
use gbgen_core::BuildInfo;
use gbgen_core::cli::{ExitCode, OutputFormat};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generate Go-safe identifiers from GrowthBook features.
#[derive(Parser, Debug)]
#[command(name = "gbgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (json|yaml|toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Go types from GrowthBook features.
    ///
    /// Writes `<outputDir>/features.gen.go`, replacing any previous file
    /// atomically.
    Generate {
        /// Config overrides
        #[command(flatten)]
        overrides: ConfigArgs,

        /// Cancel the run after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Print the generated source instead of writing the file
        #[arg(long)]
        stdout: bool,
    },

    /// Validate the config and verify API credentials.
    Check {
        /// Config overrides
        #[command(flatten)]
        overrides: ConfigArgs,

        /// Cancel the check after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Show one feature and the identifier it would be given.
    Feature {
        /// Feature key
        id: String,

        /// Config overrides
        #[command(flatten)]
        overrides: ConfigArgs,
    },

    /// Write a sample config file.
    Init {
        /// Output path for the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        out: PathBuf,

        /// Config format: json|yaml|toml (defaults from file extension)
        #[arg(long = "config-format", value_name = "FORMAT")]
        config_format: Option<String>,
    },

    /// Print version information.
    Version,

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };
    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    execute_command(cli.command, cli.config, output_format).await
}

/// Initializes logging to stderr.
///
/// `RUST_LOG` controls the filter, defaulting to `info`; `--verbose` forces
/// `debug`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Routes a command to its handler.
async fn execute_command(
    command: Commands,
    config_path: Option<PathBuf>,
    output_format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let build_info = BuildInfo::current();

    match command {
        Commands::Generate {
            overrides,
            timeout,
            stdout,
        } => {
            let options = GenerateOptions {
                config_path,
                timeout: timeout.map(Duration::from_secs),
                stdout,
            };
            commands::generate::run(options, overrides, &build_info, output_format).await
        }
        Commands::Check { overrides, timeout } => {
            commands::check::run(
                config_path,
                overrides,
                timeout.map(Duration::from_secs),
                &build_info,
                output_format,
            )
            .await
        }
        Commands::Feature { id, overrides } => {
            commands::feature::run(id, config_path, overrides, output_format).await
        }
        Commands::Init { out, config_format } => {
            commands::init::run(out, config_format, output_format).await
        }
        Commands::Version => commands::version::run(&build_info, output_format).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}
