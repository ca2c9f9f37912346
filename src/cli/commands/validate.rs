//! Validate command: check the configuration file without fetching anything.

use super::shared::{ExportStats, load_configuration};
use crate::cli::args::Args;
use crate::config::Config;
use crate::error::Result;
use colored::*;
use std::time::Instant;
use tracing::info;

pub async fn run_validate(args: &Args) -> Result<ExportStats> {
    let start_time = Instant::now();

    let config = load_configuration(args)?;
    info!("Configuration is valid");

    if !args.quiet {
        print_config_summary(&config);
    }

    Ok(ExportStats {
        sheets_processed: config.sheets.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn print_config_summary(config: &Config) {
    println!("{}", "Configuration is valid".bright_green().bold());
    println!();

    for sheet in &config.sheets {
        let range = sheet
            .range
            .as_deref()
            .map(|range| format!(" ({})", range))
            .unwrap_or_default();
        println!("  {}{}", sheet.name.bold(), range.dimmed());

        for column in &sheet.columns {
            println!(
                "    {} {}",
                column.name,
                column.logical_type.as_str().bright_blue()
            );
        }
    }
    println!();
}
