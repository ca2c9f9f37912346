//! Sheet Export Library
//!
//! Exports spreadsheet tabs into typed, schema-conformant records.
//!
//! This library provides tools for:
//! - Loading and validating a YAML configuration of sheets and column schemas
//! - Fetching spreadsheet contents from the Sheets API or a saved response
//! - Locating header rows and matching declared columns by name
//! - Coercing raw cells to string, number, boolean or timestamp values,
//!   honoring the spreadsheet time zone and number formats
//! - Writing each sheet as YAML or JSON
//!
//! Cells that cannot be coerced are never errors: the field is omitted from
//! its record and the failure is reported to a [`coercion::DiagnosticSink`].

pub mod coercion;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod models;
pub mod output;
pub mod sheet;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use coercion::{Coercer, CoercionFailure, DiagnosticSink, coerce_cell};
pub use config::{ColumnConfig, Config, SheetConfig};
pub use error::{ExportError, Result};
pub use models::{CellValue, LogicalType, RawCell, Sheet, TypedRow};
pub use sheet::build_sheets;
