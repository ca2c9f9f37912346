//! Retrieval of spreadsheet contents.
//!
//! A [`Fetcher`] turns a spreadsheet id plus the configured sheets into a
//! [`SpreadsheetGrid`], the transport-neutral shape the sheet builder consumes.

pub mod api;
pub mod file;
pub mod http;
pub mod retry;

pub use file::FileFetcher;
pub use http::{Credentials, HttpFetcher};
pub use retry::RetryPolicy;

use crate::config::SheetConfig;
use crate::error::Result;
use crate::models::SpreadsheetGrid;
use std::future::Future;

/// Which Sheets API response shape to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Full grid data with formatted values and number formats
    #[default]
    Grid,
    /// Unformatted values only; cells carry no format metadata
    ValuesOnly,
}

pub trait Fetcher {
    fn fetch(
        &self,
        spreadsheet_id: &str,
        sheets: &[SheetConfig],
    ) -> impl Future<Output = Result<SpreadsheetGrid>>;
}
