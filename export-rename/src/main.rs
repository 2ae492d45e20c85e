//! export-rename - Main entry point
//!
//! Copies bulk-exported chat audio files (`<message id>.<ext>`) to an output
//! directory under the original filenames recorded in the export's
//! `metadata.json`.
//!
//! Any setting not given on the command line, in the environment, or in the
//! TOML config file is asked for interactively.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use export_rename::config::{ConfigOverrides, LoggingConfig, SessionSettings, TomlConfig};
use export_rename::prompt::ConsolePrompter;
use export_rename::{session, CollisionPolicy};

/// Command-line arguments for export-rename
#[derive(Parser, Debug)]
#[command(name = "export-rename")]
#[command(about = "Restore original filenames of bulk-exported chat audio files")]
#[command(version)]
struct Args {
    /// Directory containing metadata.json and the exported audio files
    #[arg(short, long, env = "EXPORT_RENAME_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Directory the renamed copies are written to (created if missing)
    #[arg(short, long, env = "EXPORT_RENAME_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Save .mpga files with a .mp3 extension
    #[arg(
        long,
        env = "EXPORT_RENAME_CONVERT_MPGA",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    convert_mpga: Option<bool>,

    /// Write a results log to the output directory
    #[arg(
        long,
        env = "EXPORT_RENAME_WRITE_LOG",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    write_log: Option<bool>,

    /// Skip the confirmation after the preview
    #[arg(short, long)]
    yes: bool,

    /// What to do when two files resolve to the same output name
    #[arg(long, value_enum)]
    on_collision: Option<CollisionPolicy>,

    /// TOML config file (default: <config dir>/export-rename/config.toml)
    #[arg(short, long, env = "EXPORT_RENAME_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "export_rename=debug"
    #[arg(long, env = "EXPORT_RENAME_LOG")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            convert_mpga_to_mp3: self.convert_mpga,
            write_log: self.write_log,
            on_collision: self.on_collision,
            assume_yes: self.yes,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so its [logging] level applies
    let (toml_config, config_path) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(args.log_level.as_deref(), &toml_config.logging)?;

    info!("Starting export-rename {}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => debug!("No config file, using defaults"),
    }

    let settings = SessionSettings::resolve(args.overrides(), &toml_config)
        .context("Invalid configuration")?;

    let mut prompter = ConsolePrompter::stdio();
    let mut stdout = std::io::stdout();

    match session::run(&settings, &mut prompter, &mut stdout)? {
        Some(result) => info!(
            renamed = result.successful_renames,
            failed = result.failed_renames.len(),
            "Session complete"
        ),
        None => info!("Session cancelled"),
    }

    Ok(())
}

/// Initialize tracing on stderr
///
/// Filter priority: `--log-level`/`EXPORT_RENAME_LOG`, then `RUST_LOG`, then the
/// config file's `[logging] level`.
fn init_tracing(cli_level: Option<&str>, logging: &LoggingConfig) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level: {}", level))?,
        None => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&logging.level)
                .with_context(|| format!("Invalid log level in config: {}", logging.level))?,
        },
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
