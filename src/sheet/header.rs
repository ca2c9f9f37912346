//! Header row detection.
//!
//! Fetched ranges often start with title or notes rows. The header is the
//! first row naming at least one declared column; everything before it is
//! dropped and everything after it is data.

use crate::config::SheetConfig;
use crate::error::{ExportError, Result};
use crate::models::{GridBlock, RawCell};
use tracing::debug;

/// Header names plus the data rows that follow them
#[derive(Debug, Clone)]
pub struct HeaderedRows {
    pub header: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// Concatenate grid blocks in ascending start-row order
pub fn concat_blocks(mut blocks: Vec<GridBlock>) -> Vec<Vec<RawCell>> {
    blocks.sort_by_key(|block| block.start_row);
    blocks.into_iter().flat_map(|block| block.rows).collect()
}

/// True when any cell's display text equals a declared column name
pub fn is_header_row(row: &[RawCell], config: &SheetConfig) -> bool {
    row.iter().any(|cell| config.has_column(cell.display()))
}

/// Split rows at the first header row. No further header search happens
/// after it is found.
pub fn locate_header_and_rows(
    rows: Vec<Vec<RawCell>>,
    config: &SheetConfig,
) -> Result<HeaderedRows> {
    let mut rows = rows.into_iter();

    let mut skipped = 0usize;
    let header_row = loop {
        match rows.next() {
            Some(row) if is_header_row(&row, config) => break row,
            Some(_) => skipped += 1,
            None => {
                return Err(ExportError::ColumnsNotFound {
                    name: config.name.clone(),
                });
            }
        }
    };

    let header: Vec<String> = header_row
        .iter()
        .map(|cell| cell.display().to_string())
        .collect();
    let data: Vec<Vec<RawCell>> = rows.collect();

    debug!(
        "Sheet {}: header found after {} leading rows, {} data rows",
        config.name,
        skipped,
        data.len()
    );

    Ok(HeaderedRows { header, rows: data })
}
