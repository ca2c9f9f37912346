//! Writers for exported sheets.
//!
//! Each sheet is written to `<dir>/<sheet name>.<ext>` as an ordered sequence
//! of record mappings. Absent fields are omitted from their mapping.

use crate::error::{ExportError, Result};
use crate::models::Sheet;
use clap::ValueEnum;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn outputter(self) -> Box<dyn Outputter> {
        match self {
            OutputFormat::Yaml => Box::new(YamlOutputter),
            OutputFormat::Json => Box::new(JsonOutputter),
        }
    }
}

pub trait Outputter {
    /// File extension, also used as the format name in errors
    fn extension(&self) -> &'static str;

    /// Serialise one sheet into `writer`
    fn write_sheet(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()>;

    /// Write every sheet into `dir`, creating it if needed. Returns the paths
    /// written, in sheet order.
    fn output(&self, dir: &Path, sheets: &[Sheet]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

        let mut written = Vec::with_capacity(sheets.len());
        for sheet in sheets {
            let path = dir.join(format!("{}.{}", file_stem(sheet.name()), self.extension()));
            debug!("Writing {} records to {}", sheet.rows.len(), path.display());

            let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
            let mut writer = BufWriter::new(file);
            self.write_sheet(sheet, &mut writer)?;
            writer.flush().map_err(|e| ExportError::io(&path, e))?;

            written.push(path);
        }

        info!("Wrote {} {} file(s) to {}", written.len(), self.extension(), dir.display());
        Ok(written)
    }
}
/// Sheet title with path separators replaced by underscores
/// Sheet title with path separators replaced, so every sheet lands directly in the output directory
fn file_stem(sheet_name: &str) -> String {
    sheet_name.replace(['/', '\\'], "_")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlOutputter;

impl Outputter for YamlOutputter {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn write_sheet(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()> {
        serde_yaml::to_writer(writer, sheet).map_err(|e| ExportError::Serialize {
            sheet: sheet.name().to_string(),
            format: self.extension(),
            message: e.to_string(),
        })
    }
}

/// Pretty-printed JSON with a trailing newline
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutputter;

impl Outputter for JsonOutputter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write_sheet(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()> {
        let serialize_error = |message: String| ExportError::Serialize {
            sheet: sheet.name().to_string(),
            format: self.extension(),
            message,
        };

        serde_json::to_writer_pretty(&mut *writer, sheet).map_err(|e| serialize_error(e.to_string()))?;
        writer
            .write_all(b"\n")
            .map_err(|e| serialize_error(e.to_string()))
    }
}
