//! Google Sheets API v4 response types
//!
//! Only the fields the reader needs are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Spreadsheet resource, restricted by the `fields` mask to properties
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetMetadata {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

/// Per-tab properties
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: u32,
    /// "GRID" for cell sheets, "OBJECT" for chart-only tabs
    #[serde(default)]
    pub sheet_type: Option<String>,
    #[serde(default)]
    pub grid_properties: Option<GridProperties>,
}

impl SheetProperties {
    /// Chart-only tabs have no cell range to read
    pub fn has_cells(&self) -> bool {
        !matches!(self.sheet_type.as_deref(), Some("OBJECT"))
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub column_count: usize,
}

/// Result of `spreadsheets.values.get`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    /// Omitted entirely by the API when the range is empty
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Standard Google API error body
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleApiError {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
