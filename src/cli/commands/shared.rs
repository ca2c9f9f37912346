//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and the run statistics reported by
//! every command.

use crate::cli::args::Args;
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Statistics for reporting at the end of a run
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Number of sheets exported (or validated)
    pub sheets_processed: usize,
    /// Number of records written across all sheets
    pub rows_written: usize,
    /// Number of fields omitted because their cell could not be coerced
    pub coercion_failures: usize,
    /// Files written, in sheet order
    pub output_files: Vec<PathBuf>,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging on stderr; `RUST_LOG` overrides the CLI level
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // RUST_LOG replaces the whole filter, not just the crate level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    // Quiet runs print errors only, so drop the timer
    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Uptime stamps show how long the fetch and retries took
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load and validate the configuration file named on the command line
pub fn load_configuration(args: &Args) -> Result<Config> {
    info!("Using config file: {}", args.config_file.display());

    let config = Config::load(&args.config_file)?;

    debug!("Loaded {} sheet configuration(s)", config.sheets.len());
    Ok(config)
}

/// Create a spinner for steps without a known length
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
