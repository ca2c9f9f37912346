//! Sheet building: from a fetched grid to typed sheets.
//!
//! For each configured sheet the matching tab is located, its blocks are
//! concatenated, the header row is found and every data row is assembled
//! into a typed record.

pub mod assembler;
pub mod header;

#[cfg(test)]
mod tests;

pub use assembler::{ColumnPositions, assemble};
pub use header::{HeaderedRows, concat_blocks, locate_header_and_rows};

use crate::coercion::{Coercer, DiagnosticSink, resolve_time_zone};
use crate::config::SheetConfig;
use crate::error::{ExportError, Result};
use crate::models::{Sheet, SheetGrid, SpreadsheetGrid};
use std::collections::HashMap;
use tracing::info;

/// Build one [`Sheet`] per configuration, in configuration order.
///
/// Any structural failure (no sheets at all, a missing tab, no header row,
/// an unknown time zone) aborts the whole build.
pub fn build_sheets<S: DiagnosticSink + ?Sized>(
    spreadsheet_id: &str,
    configs: &[SheetConfig],
    grid: SpreadsheetGrid,
    sink: &S,
) -> Result<Vec<Sheet>> {
    if grid.sheets.is_empty() {
        return Err(ExportError::NoSheets);
    }

    let zone = resolve_time_zone(grid.time_zone.as_deref())?;
    let coercer = Coercer::new(zone, sink);

    let mut by_title: HashMap<String, SheetGrid> = HashMap::with_capacity(grid.sheets.len());
    for sheet in grid.sheets {
        by_title.entry(sheet.title.clone()).or_insert(sheet);
    }

    let mut sheets = Vec::with_capacity(configs.len());
    for config in configs {
        let sheet_grid = by_title
            .remove(&config.name)
            .ok_or_else(|| ExportError::SheetNotFound {
                name: config.name.clone(),
            })?;

        let located = locate_header_and_rows(concat_blocks(sheet_grid.blocks), config)?;
        let rows = assemble(&located.header, &located.rows, config, &coercer);

        info!("Sheet {}: {} records", config.name, rows.len());

        sheets.push(Sheet {
            spreadsheet_id: spreadsheet_id.to_string(),
            config: config.clone(),
            rows,
        });
    }

    Ok(sheets)
}
