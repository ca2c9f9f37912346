//! Sheets API payloads and their adaptation to raw cells.
//!
//! Two response shapes are understood: the grid response of
//! `spreadsheets.get?includeGridData=true` and the values-only response of
//! `spreadsheets.values.batchGet`. Both are converted into a
//! [`SpreadsheetGrid`] here, at the fetch boundary.

use crate::models::{
    EffectiveValue, GridBlock, NumberFormat, RawCell, ScalarValue, SheetGrid, SpreadsheetGrid,
};
use serde::Deserialize;
use std::collections::HashMap;

// =============================================================================
// Grid response
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetPayload {
    #[serde(default)]
    pub properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    pub sheets: Vec<SheetPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPayload {
    #[serde(default)]
    pub properties: Option<SheetProperties>,
    #[serde(default)]
    pub data: Vec<GridDataPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDataPayload {
    #[serde(default)]
    pub start_row: usize,
    #[serde(default)]
    pub row_data: Vec<RowDataPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDataPayload {
    #[serde(default)]
    pub values: Vec<CellDataPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDataPayload {
    #[serde(default)]
    pub formatted_value: Option<String>,
    #[serde(default)]
    pub effective_value: Option<ExtendedValuePayload>,
    #[serde(default)]
    pub user_entered_format: Option<CellFormatPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValuePayload {
    #[serde(default)]
    pub number_value: Option<f64>,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub bool_value: Option<bool>,
    #[serde(default)]
    pub error_value: Option<ErrorValuePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorValuePayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormatPayload {
    #[serde(default)]
    pub number_format: Option<NumberFormatPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NumberFormatPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl ExtendedValuePayload {
    /// Error values take precedence; otherwise number, text, boolean
    fn into_effective(self) -> Option<EffectiveValue> {
        if let Some(error) = self.error_value {
            return Some(EffectiveValue::Error {
                message: error.message.unwrap_or_default(),
                kind: error.kind.unwrap_or_default(),
            });
        }
        if let Some(n) = self.number_value {
            return Some(EffectiveValue::Number(n));
        }
        if let Some(s) = self.string_value {
            return Some(EffectiveValue::Text(s));
        }
        self.bool_value.map(EffectiveValue::Boolean)
    }
}

impl From<CellDataPayload> for RawCell {
    fn from(cell: CellDataPayload) -> Self {
        let number_format = cell
            .user_entered_format
            .and_then(|format| format.number_format)
            .and_then(|format| format.kind)
            .map(|kind| NumberFormat::from_api_name(&kind))
            .unwrap_or_default();

        RawCell::from_grid(
            cell.formatted_value.unwrap_or_default(),
            cell.effective_value.and_then(ExtendedValuePayload::into_effective),
            number_format,
        )
    }
}

impl From<SheetPayload> for SheetGrid {
    fn from(sheet: SheetPayload) -> Self {
        let title = sheet.properties.map(|p| p.title).unwrap_or_default();
        let blocks = sheet
            .data
            .into_iter()
            .map(|data| GridBlock {
                start_row: data.start_row,
                rows: data
                    .row_data
                    .into_iter()
                    .map(|row| row.values.into_iter().map(RawCell::from).collect())
                    .collect(),
            })
            .collect();

        SheetGrid { title, blocks }
    }
}

impl From<SpreadsheetPayload> for SpreadsheetGrid {
    fn from(payload: SpreadsheetPayload) -> Self {
        SpreadsheetGrid {
            time_zone: payload.properties.and_then(|p| p.time_zone),
            sheets: payload.sheets.into_iter().map(SheetGrid::from).collect(),
        }
    }
}

// =============================================================================
// Values-only response
// =============================================================================

/// A `values.batchGet` response. The API does not return the spreadsheet
/// time zone with values, so it is carried alongside.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesPayload {
    #[serde(default)]
    pub time_zone: Option<String>,
    pub value_ranges: Vec<ValueRangePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRangePayload {
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Map an unformatted JSON scalar onto the raw cell contract
pub fn scalar_from_json(value: serde_json::Value) -> ScalarValue {
    use serde_json::Value;

    match value {
        Value::Null => ScalarValue::Null,
        Value::Bool(b) => ScalarValue::Boolean(b),
        Value::Number(n) => n
            .as_f64()
            .map(ScalarValue::Number)
            .unwrap_or_else(|| ScalarValue::Text(n.to_string())),
        Value::String(s) => ScalarValue::Text(s),
        other => ScalarValue::Text(other.to_string()),
    }
}

/// Extract the sheet title from an A1 range such as `'Bob''s'!A1:C9`
pub fn sheet_title_from_range(range: &str) -> String {
    let title = match range.rfind('!') {
        Some(bang) => &range[..bang],
        None => range,
    };

    match title
        .strip_prefix('\'')
        .and_then(|quoted| quoted.strip_suffix('\''))
    {
        Some(quoted) => quoted.replace("''", "'"),
        None => title.to_string(),
    }
}

impl From<ValuesPayload> for SpreadsheetGrid {
    fn from(payload: ValuesPayload) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut blocks: HashMap<String, Vec<GridBlock>> = HashMap::new();

        for value_range in payload.value_ranges {
            let title = sheet_title_from_range(&value_range.range);
            let rows = value_range
                .values
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|value| RawCell::from_scalar(scalar_from_json(value)))
                        .collect()
                })
                .collect();

            let entry = blocks.entry(title.clone()).or_insert_with(|| {
                order.push(title);
                Vec::new()
            });
            // Ranges for one title are stacked in response order
            let start_row = entry
                .iter()
                .map(|block| block.start_row + block.rows.len())
                .max()
                .unwrap_or(0);
            entry.push(GridBlock { start_row, rows });
        }

        let sheets = order
            .into_iter()
            .map(|title| {
                let blocks = blocks.remove(&title).unwrap_or_default();
                SheetGrid { title, blocks }
            })
            .collect();

        SpreadsheetGrid {
            time_zone: payload.time_zone,
            sheets,
        }
    }
}

// =============================================================================
// Saved payloads
// =============================================================================

/// Either response shape, as stored on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SavedPayload {
    Values(ValuesPayload),
    Grid(SpreadsheetPayload),
}

impl From<SavedPayload> for SpreadsheetGrid {
    fn from(payload: SavedPayload) -> Self {
        match payload {
            SavedPayload::Values(values) => values.into(),
            SavedPayload::Grid(grid) => grid.into(),
        }
    }
}
