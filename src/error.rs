//! Error handling for spreadsheet export operations.
//!
//! Structural failures (missing sheets, unmatched headers, bad configuration,
//! transport problems) are fatal for the affected export and surface here.
//! Per-cell coercion failures are not errors; see [`crate::coercion`].

use crate::constants::HTTP_TOO_MANY_REQUESTS;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Spreadsheet response contains no sheets")]
    NoSheets,

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Columns not found: {name}")]
    ColumnsNotFound { name: String },

    #[error("Unknown time zone: {name}")]
    UnknownTimeZone { name: String },

    #[error("Malformed spreadsheet payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service account authentication failed: {message}")]
    Auth { message: String },

    #[error("Sheets API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Failed to serialize sheet {sheet} as {format}: {message}")]
    Serialize {
        sheet: String,
        format: &'static str,
        message: String,
    },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl ExportError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True when the Sheets API rejected the call with 429 Too Many Requests
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == HTTP_TOO_MANY_REQUESTS)
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
