//! Fetcher backed by a saved API response on disk.

use super::Fetcher;
use super::api::SavedPayload;
use crate::config::SheetConfig;
use crate::error::{ExportError, Result};
use crate::models::SpreadsheetGrid;
use std::path::PathBuf;
use tracing::debug;

/// Reads a spreadsheet payload previously saved from the Sheets API.
///
/// Both the grid response (`spreadsheets.get` with grid data) and the
/// values-only response (`values:batchGet`) are accepted. The spreadsheet id
/// is ignored; the file already names its contents.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetcher for FileFetcher {
    async fn fetch(&self, _spreadsheet_id: &str, sheets: &[SheetConfig]) -> Result<SpreadsheetGrid> {
        debug!(
            "Reading saved payload for {} sheet(s) from {}",
            sheets.len(),
            self.path.display()
        );

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ExportError::io(&self.path, e))?;
        let payload: SavedPayload = serde_json::from_str(&content)?;

        Ok(payload.into())
    }
}
