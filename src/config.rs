//! Configuration loading and validation.
//!
//! The configuration file declares, per sheet, the tab title, an optional
//! range and the ordered column schema the export is matched against.

use crate::error::{ExportError, Result};
use crate::models::LogicalType;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static A1_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+[0-9]+)(:[A-Z]+[0-9]+)?$").expect("A1 range pattern is valid")
});

static R1C1_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(R[0-9]+C[0-9]+)(:R[0-9]+C[0-9]+)?$").expect("R1C1 range pattern is valid")
});

/// Top-level export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheets: Vec<SheetConfig>,
}

/// Export settings for one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Sheet (tab) title
    pub name: String,

    /// Optional A1 or R1C1 range restricting the fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Drop records for rows where every column resolved to absent.
    /// Off by default so output rows line up with sheet rows.
    #[serde(default)]
    pub skip_empty_rows: bool,

    /// Ordered column schema
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

/// One declared column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub logical_type: LogicalType,
}

impl Serialize for LogicalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogicalType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Config {
    /// Read, parse and validate a YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let config = Self::from_yaml(&contents).map_err(|e| match e {
            ExportError::ConfigParse { source, .. } => ExportError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!(
            "Loaded configuration from {} with {} sheets",
            path.display(),
            config.sheets.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(contents).map_err(|source| ExportError::ConfigParse {
                path: Default::default(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheets.is_empty() {
            return Err(ExportError::invalid_config("sheets is empty"));
        }

        let mut seen = HashSet::new();
        for sheet in &self.sheets {
            sheet.validate()?;
            if !seen.insert(sheet.name.as_str()) {
                return Err(ExportError::invalid_config(format!(
                    "duplicate sheet name: {}",
                    sheet.name
                )));
            }
        }

        Ok(())
    }

    /// Look up a sheet configuration by title
    #[cfg(test)]
    pub fn sheet(&self, name: &str) -> Option<&SheetConfig> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ExportError::invalid_config("name is empty"));
        }

        if let Some(range) = &self.range {
            if !A1_RANGE.is_match(range) && !R1C1_RANGE.is_match(range) {
                return Err(ExportError::invalid_config(format!(
                    "invalid range format in sheet {}: {}",
                    self.name, range
                )));
            }
        }

        if self.columns.is_empty() {
            return Err(ExportError::invalid_config(format!(
                "columns is empty in sheet {}",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(ExportError::invalid_config(format!(
                    "column name is required in sheet {}",
                    self.name
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ExportError::invalid_config(format!(
                    "duplicate column {} in sheet {}",
                    column.name, self.name
                )));
            }
        }

        Ok(())
    }

    /// Range expression sent to the Sheets API: `Title` or `Title!A1:B2`.
    /// Titles that are not plain identifiers are single-quoted before a range.
    pub fn fetch_range(&self) -> String {
        match &self.range {
            Some(range) if self.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
                format!("{}!{}", self.name, range)
            }
            Some(range) => format!("'{}'!{}", self.name.replace('\'', "''"), range),
            None => self.name.clone(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }
}
