//! Export command: fetch the spreadsheet, build typed sheets and write them.

use super::shared::{ExportStats, create_spinner, load_configuration};
use crate::cli::args::{Args, ExportArgs};
use crate::coercion::TracingSink;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{FileFetcher, Fetcher, HttpFetcher};
use crate::models::{Sheet, SpreadsheetGrid};
use crate::sheet::build_sheets;
use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info};

pub async fn run_export(args: &Args, export: &ExportArgs) -> Result<ExportStats> {
    let start_time = Instant::now();
    debug!(
        "Exporting {} as {:?} into {}",
        export.spreadsheet_id,
        export.format,
        export.output_dir.display()
    );

    let config = load_configuration(args)?;

    let spinner = args
        .show_progress()
        .then(|| create_spinner("Fetching spreadsheet..."));

    let grid = fetch_grid(export, &config).await;
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let grid = grid?;

    let sink = TracingSink::new();
    let sheets = build_sheets(&export.spreadsheet_id, &config.sheets, grid, &sink)?;

    let outputter = export.format.outputter();
    let output_files = outputter.output(&export.output_dir, &sheets)?;

    let stats = ExportStats {
        sheets_processed: sheets.len(),
        rows_written: sheets.iter().map(|sheet| sheet.rows.len()).sum(),
        coercion_failures: sink.failure_count(),
        output_files,
        processing_time: start_time.elapsed(),
    };

    info!(
        "Export completed in {:.2}s: {} sheets, {} records",
        stats.processing_time.as_secs_f64(),
        stats.sheets_processed,
        stats.rows_written
    );

    if !args.quiet {
        print_export_summary(&stats, &sheets);
    }

    Ok(stats)
}

async fn fetch_grid(export: &ExportArgs, config: &Config) -> Result<SpreadsheetGrid> {
    match &export.input {
        Some(path) => {
            info!("Reading saved spreadsheet from {}", path.display());
            FileFetcher::new(path)
                .fetch(&export.spreadsheet_id, &config.sheets)
                .await
        }
        None => {
            info!("Fetching spreadsheet {}", export.spreadsheet_id);
            HttpFetcher::new(export.credentials())?
                .with_mode(export.fetch_mode())
                .fetch(&export.spreadsheet_id, &config.sheets)
                .await
        }
    }
}

fn print_export_summary(stats: &ExportStats, sheets: &[Sheet]) {
    println!("{}", "Export complete".bright_green().bold());
    println!();

    for (sheet, path) in sheets.iter().zip(&stats.output_files) {
        println!(
            "  {} {} records -> {}",
            sheet.name().bold(),
            sheet.rows.len().to_string().bright_yellow(),
            path.display()
        );
    }
    println!();

    println!("  Sheets:  {}", stats.sheets_processed);
    println!("  Records: {}", stats.rows_written);
    if stats.coercion_failures > 0 {
        println!(
            "  {} {} (run with -v for details)",
            "Omitted fields:".yellow(),
            stats.coercion_failures
        );
    }
    println!("  Time:    {}", HumanDuration(stats.processing_time));
}
