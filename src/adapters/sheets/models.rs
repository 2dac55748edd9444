//! Google Sheets API v4 response models

use serde::Deserialize;
use serde_json::Value;

/// Subset of the spreadsheet resource returned by `GET /spreadsheets/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetMetadata {
    /// Worksheets of the spreadsheet
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

/// One worksheet entry
#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    /// Worksheet properties
    pub properties: SheetProperties,
}

/// Worksheet properties
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    /// Stable worksheet id (the `gid`)
    pub sheet_id: u64,

    /// Current worksheet title
    pub title: String,
}

/// Value range returned by `GET /spreadsheets/{key}/values/{range}`
///
/// `values` is omitted by the API when the range is empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// A1 range actually returned
    #[serde(default)]
    pub range: Option<String>,

    /// Row-major cell values
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Convert the cell values into rectangular string rows
    ///
    /// The API trims trailing empty cells per row; rows are padded back to the
    /// widest row so every row has one cell per column.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        let width = self.values.iter().map(Vec::len).max().unwrap_or(0);

        self.values
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.into_iter().map(cell_to_string).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect()
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
