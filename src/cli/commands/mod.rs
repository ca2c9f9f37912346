//! Command implementations for the sheet-export CLI
//!
//! Each subcommand lives in its own module; shared setup (logging,
//! configuration loading, spinners) is in [`shared`].

pub mod export;
pub mod shared;
pub mod validate;

pub use shared::ExportStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler. Logging must already be initialised.
pub async fn run(args: Args) -> Result<ExportStats> {
    match &args.command {
        Commands::Validate => validate::run_validate(&args).await,
        Commands::Export(export_args) => export::run_export(&args, export_args).await,
    }
}
