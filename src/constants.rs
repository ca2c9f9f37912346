//! Application constants for the sheet exporter
//!
//! Timestamp layouts, serial-date conventions, Sheets API request settings
//! and CLI defaults used throughout the crate.

use std::time::Duration;

// =============================================================================
// Timestamp Parsing
// =============================================================================

/// Layouts carrying an explicit UTC offset. The embedded offset always wins
/// over the spreadsheet time zone. A trailing `Z` is rewritten to `+00:00`
/// before these are tried.
pub const OFFSET_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y/%m/%dT%H:%M:%S%.f%:z",
    "%Y/%m/%d %H:%M:%S%.f%:z",
];

/// Zone-less date-time layouts, interpreted in the spreadsheet time zone
pub const LOCAL_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Bare date layouts, midnight in the spreadsheet time zone
pub const LOCAL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Serial date epoch (1899-12-30), the day numbered zero by spreadsheet applications
pub mod serial_epoch {
    pub const YEAR: i32 = 1899;
    pub const MONTH: u32 = 12;
    pub const DAY: u32 = 30;
}

pub const NANOS_PER_DAY: f64 = 86_400.0 * 1_000_000_000.0;

/// Serials at or beyond this many days lie outside chrono's date range
pub const MAX_SERIAL_DAYS: f64 = 1.0e8;

/// Time zone used when the spreadsheet does not declare one
pub const DEFAULT_TIME_ZONE: &str = "UTC";

// =============================================================================
// Sheets API
// =============================================================================

pub const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Field mask for grid fetches; only what the coercion engine consumes
pub const GRID_FIELDS: &[&str] = &[
    "properties.timeZone",
    "sheets.properties.title",
    "sheets.data.startRow",
    "sheets.data.rowData.values.userEnteredFormat.numberFormat.type",
    "sheets.data.rowData.values.formattedValue",
    "sheets.data.rowData.values.effectiveValue",
];

/// Render options for values-only fetches
pub const VALUE_RENDER_OPTION: &str = "UNFORMATTED_VALUE";
pub const DATE_TIME_RENDER_OPTION: &str = "FORMATTED_STRING";

pub const HTTP_TOO_MANY_REQUESTS: u16 = 429;

/// OAuth2 scope requested for service-account tokens
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

// =============================================================================
// Retry Policy
// =============================================================================

pub const RETRY_MIN_DELAY: Duration = Duration::from_secs(1);
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(100);
pub const RETRY_MAX_ATTEMPTS: u32 = 10;

// =============================================================================
// CLI Defaults
// =============================================================================

pub const DEFAULT_CONFIG_FILE: &str = "sheet-export.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const SPREADSHEET_ID_ENV: &str = "SHEET_EXPORT_SPREADSHEET_ID";
pub const ACCESS_TOKEN_ENV: &str = "SHEET_EXPORT_ACCESS_TOKEN";
pub const API_KEY_ENV: &str = "SHEET_EXPORT_API_KEY";
pub const CREDENTIAL_FILE_ENV: &str = "SHEET_EXPORT_CREDENTIAL";

/// Service-account key used when neither a token nor an API key is given
pub const DEFAULT_CREDENTIAL_FILE: &str = "credential.json";

/// Crate target used for the default log filter
pub const LOG_TARGET: &str = "sheet_export";
