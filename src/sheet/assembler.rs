//! Typed record assembly.
//!
//! Applies the coercer to every declared column of every data row and
//! packages the present values as ordered records.

use crate::coercion::{Coercer, DiagnosticSink};
use crate::config::SheetConfig;
use crate::models::{LogicalType, RawCell, TypedRow};
use std::collections::HashMap;
use tracing::debug;

/// Where each declared column sits in the header, in declaration order.
/// Columns missing from the header are not listed.
#[derive(Debug, Clone)]
pub struct ColumnPositions {
    positions: Vec<(String, LogicalType, Vec<usize>)>,
}

impl ColumnPositions {
    /// A name repeated in the header keeps every position, left to right
    pub fn resolve(header: &[String], config: &SheetConfig) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (position, name) in header.iter().enumerate() {
            by_name.entry(name.as_str()).or_default().push(position);
        }

        let positions = config
            .columns
            .iter()
            .filter_map(|column| {
                by_name
                    .remove(column.name.as_str())
                    .map(|found| (column.name.clone(), column.logical_type, found))
            })
            .collect();

        Self { positions }
    }
}

/// Build one record per data row.
///
/// Cells past the end of a short row are treated as missing and skipped
/// without a diagnostic. Rows whose fields are all absent still yield an
/// empty record unless the sheet sets `skip_empty_rows`.
pub fn assemble<S: DiagnosticSink + ?Sized>(
    header: &[String],
    rows: &[Vec<RawCell>],
    config: &SheetConfig,
    coercer: &Coercer<'_, S>,
) -> Vec<TypedRow> {
    let columns = ColumnPositions::resolve(header, config);
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for row in rows {
        let record = assemble_row(row, &columns, coercer);
        if record.is_empty() && config.skip_empty_rows {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    debug!(
        "Sheet {}: assembled {} records from {} rows ({} empty rows skipped)",
        config.name,
        records.len(),
        rows.len(),
        skipped
    );

    records
}

fn assemble_row<S: DiagnosticSink + ?Sized>(
    row: &[RawCell],
    columns: &ColumnPositions,
    coercer: &Coercer<'_, S>,
) -> TypedRow {
    let mut record = TypedRow::new();
    for (name, logical_type, positions) in &columns.positions {
        // Under a repeated header name the rightmost present value wins
        let value = positions
            .iter()
            .filter_map(|position| row.get(*position))
            .filter_map(|cell| coercer.coerce(name, cell, *logical_type))
            .last();
        if let Some(value) = value {
            record.push(name.clone(), value);
        }
    }
    record
}
