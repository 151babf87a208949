//! Normalized in-memory spreadsheet model
//!
//! Every sheet is kept as a rectangular grid of formatted strings with
//! all-empty rows removed. Header-keyed views are derived from the grid by
//! the prompt projections, never stored.

use serde::Serialize;
use serde_json::Value;

/// One fetched spreadsheet; lives for a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadsheetDocument {
    /// Opaque identifier the document was fetched with
    pub id: String,
    /// Document title, when the service reported one
    pub title: Option<String>,
    /// Sheets in tab order
    pub sheets: Vec<SheetTable>,
}

impl SpreadsheetDocument {
    pub fn new(id: impl Into<String>, sheets: Vec<SheetTable>) -> Self {
        Self {
            id: id.into(),
            title: None,
            sheets,
        }
    }

    /// First sheet with the given title. Titles are assumed unique.
    pub fn sheet(&self, title: &str) -> Option<&SheetTable> {
        self.sheets.iter().find(|sheet| sheet.title == title)
    }
}

/// Contents of a single tab
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTable {
    pub title: String,
    /// Grid extents reported by the service
    pub row_count: usize,
    pub column_count: usize,
    /// Non-empty rows, padded to the widest row
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Normalize a raw value range into a dense grid
    pub fn from_values(
        title: impl Into<String>,
        row_count: usize,
        column_count: usize,
        values: Vec<Vec<Value>>,
    ) -> Self {
        let mut rows: Vec<Vec<String>> = values
            .into_iter()
            .map(|row| row.into_iter().map(render_cell).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Self {
            title: title.into(),
            row_count,
            column_count,
            rows,
        }
    }

    /// First row, treated as column headers by the projections
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Formatted values arrive as strings; numbers and booleans only appear when
/// the caller asked for unformatted values, so both are handled.
fn render_cell(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}
