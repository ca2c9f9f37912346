//! Core data structures shared by the fetch, coercion and output layers.
//!
//! Defines the raw cell representation consumed by the coercion engine,
//! the typed values it produces, and the sheet aggregate handed to writers.

use crate::config::SheetConfig;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// Absolute point in time with the offset it was resolved in
pub type Timestamp = DateTime<FixedOffset>;

/// Logical column types a schema can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    String,
    Number,
    Boolean,
    Timestamp,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::String => "string",
            LogicalType::Number => "number",
            LogicalType::Boolean => "boolean",
            LogicalType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(LogicalType::String),
            "number" => Ok(LogicalType::Number),
            "boolean" => Ok(LogicalType::Boolean),
            "timestamp" => Ok(LogicalType::Timestamp),
            "" => Err("column type is required".to_string()),
            other => Err(format!("not supported column type: {}", other)),
        }
    }
}

/// How a numeric effective value should be read, as declared by the cell format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    #[default]
    Unspecified,
    Text,
    Number,
    Percent,
    Currency,
    Date,
    Time,
    DateTime,
    Scientific,
}

impl NumberFormat {
    /// Map a Sheets API `NumberFormatType` name; unknown names read as unspecified
    pub fn from_api_name(name: &str) -> Self {
        match name {
            "TEXT" => NumberFormat::Text,
            "NUMBER" => NumberFormat::Number,
            "PERCENT" => NumberFormat::Percent,
            "CURRENCY" => NumberFormat::Currency,
            "DATE" => NumberFormat::Date,
            "TIME" => NumberFormat::Time,
            "DATE_TIME" => NumberFormat::DateTime,
            "SCIENTIFIC" => NumberFormat::Scientific,
            _ => NumberFormat::Unspecified,
        }
    }
}

/// Underlying typed content of a cell, distinct from its rendered text
#[derive(Debug, Clone, PartialEq)]
pub enum EffectiveValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Error { message: String, kind: String },
}

/// Which fetch shape a cell was adapted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    /// Full grid data: formatted text, effective value and format hint
    Grid,
    /// Values-only data: an unformatted scalar, no formatting metadata
    Scalar,
}

/// Unformatted scalar as returned by a values-only fetch
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
}

/// The unit the coercion engine consumes.
///
/// Both fetch shapes are normalised into this one type so that coercion
/// and assembly have a single code path.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell {
    display: String,
    effective: Option<EffectiveValue>,
    number_format: NumberFormat,
    shape: CellShape,
}

impl RawCell {
    /// Adapt a grid cell (formatted value, effective value, number format)
    pub fn from_grid(
        display: impl Into<String>,
        effective: Option<EffectiveValue>,
        number_format: NumberFormat,
    ) -> Self {
        Self {
            display: display.into(),
            effective,
            number_format,
            shape: CellShape::Grid,
        }
    }

    /// Adapt a values-only scalar; the format hint is always unspecified
    pub fn from_scalar(value: ScalarValue) -> Self {
        let (display, effective) = match value {
            ScalarValue::Number(n) => (format_decimal(n), Some(EffectiveValue::Number(n))),
            ScalarValue::Text(s) => (s.clone(), Some(EffectiveValue::Text(s))),
            ScalarValue::Boolean(b) => (b.to_string(), Some(EffectiveValue::Boolean(b))),
            ScalarValue::Null => (String::new(), None),
        };
        Self {
            display,
            effective,
            number_format: NumberFormat::Unspecified,
            shape: CellShape::Scalar,
        }
    }

    /// Grid cell with no content
    pub fn blank() -> Self {
        Self::from_grid("", None, NumberFormat::Unspecified)
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn effective(&self) -> Option<&EffectiveValue> {
        self.effective.as_ref()
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }

    pub fn shape(&self) -> CellShape {
        self.shape
    }

    pub fn is_blank(&self) -> bool {
        self.effective.is_none() && self.display.is_empty()
    }
}

/// Render a float as plain decimal text: no exponent, no trailing zeros
pub fn format_decimal(value: f64) -> String {
    format!("{}", value)
}

/// A resolved, typed output value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(Timestamp),
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

/// One output record: column name to value, in schema declaration order.
/// Absent values are omitted, never nulled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedRow {
    fields: Vec<(String, CellValue)>,
}

impl TypedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; the assembler visits each declared column once
    pub fn push(&mut self, name: impl Into<String>, value: CellValue) {
        self.fields.push((name.into(), value));
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for TypedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A sheet exported against one schema; read-only once built
#[derive(Debug, Clone)]
pub struct Sheet {
    pub spreadsheet_id: String,
    pub config: SheetConfig,
    pub rows: Vec<TypedRow>,
}

impl Sheet {
    pub fn name(&self) -> &str {
        &self.config.name
    }
}

/// Serialises as the ordered sequence of row mappings
impl Serialize for Sheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

// =============================================================================
// Fetched grid, already adapted to raw cells
// =============================================================================

/// A contiguous block of rows starting at `start_row` (0-based)
#[derive(Debug, Clone, Default)]
pub struct GridBlock {
    pub start_row: usize,
    pub rows: Vec<Vec<RawCell>>,
}

#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub title: String,
    pub blocks: Vec<GridBlock>,
}

/// Everything the coercion engine needs from one fetch
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetGrid {
    /// IANA time zone identifier declared by the spreadsheet, if any
    pub time_zone: Option<String>,
    pub sheets: Vec<SheetGrid>,
}
