//! Tests for header matching, record assembly and sheet building

pub mod header_tests;

use crate::config::{ColumnConfig, SheetConfig};
use crate::models::{EffectiveValue, LogicalType, NumberFormat, RawCell};

/// Row of plain text cells
pub fn text_row(values: &[&str]) -> Vec<RawCell> {
    values
        .iter()
        .map(|value| {
            if value.is_empty() {
                RawCell::blank()
            } else {
                RawCell::from_grid(
                    *value,
                    Some(EffectiveValue::Text(value.to_string())),
                    NumberFormat::Unspecified,
                )
            }
        })
        .collect()
}

pub fn number(display: &str, value: f64, format: NumberFormat) -> RawCell {
    RawCell::from_grid(display, Some(EffectiveValue::Number(value)), format)
}

pub fn sheet_config(name: &str, columns: &[(&str, LogicalType)]) -> SheetConfig {
    SheetConfig {
        name: name.to_string(),
        range: None,
        skip_empty_rows: false,
        columns: columns
            .iter()
            .map(|(column, logical_type)| ColumnConfig {
                name: column.to_string(),
                logical_type: *logical_type,
            })
            .collect(),
    }
}
