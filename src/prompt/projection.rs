//! Projections from the normalized grid to prompt data

use serde_json::{json, Map, Value};

use crate::sheets::{SheetTable, SpreadsheetDocument};

/// Turns a fetched document into the JSON embedded in the system prompt
pub trait SheetProjection: Send + Sync {
    fn project(&self, document: &SpreadsheetDocument) -> Value;
}

/// Header-keyed records per sheet
///
/// ```json
/// {"Sales": {"title": "Sales", "headers": ["Date", "Revenue"],
///            "rows": [{"Date": "2024-01-01", "Revenue": "1200"}]}}
/// ```
///
/// The first row supplies the keys. Headers that are blank or start with `_`
/// are reserved and left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowRecords;

impl RowRecords {
    fn sheet_value(sheet: &SheetTable) -> Value {
        let columns: Vec<(usize, &str)> = sheet
            .header()
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .map(|(i, name)| (i, name.trim()))
            .filter(|(_, name)| !name.is_empty() && !name.starts_with('_'))
            .collect();

        let rows: Vec<Value> = sheet
            .data_rows()
            .iter()
            .map(|row| {
                let record: Map<String, Value> = columns
                    .iter()
                    .map(|(i, name)| {
                        let cell = row.get(*i).cloned().unwrap_or_default();
                        (name.to_string(), Value::String(cell))
                    })
                    .collect();
                Value::Object(record)
            })
            .collect();

        let headers: Vec<&str> = columns.iter().map(|(_, name)| *name).collect();
        json!({
            "title": sheet.title,
            "headers": headers,
            "rows": rows,
        })
    }
}

impl SheetProjection for RowRecords {
    fn project(&self, document: &SpreadsheetDocument) -> Value {
        let sheets: Map<String, Value> = document
            .sheets
            .iter()
            .map(|sheet| (sheet.title.clone(), Self::sheet_value(sheet)))
            .collect();
        Value::Object(sheets)
    }
}

/// Raw grid per sheet, header row included
#[derive(Debug, Clone, Copy, Default)]
pub struct CellGrid;

impl SheetProjection for CellGrid {
    fn project(&self, document: &SpreadsheetDocument) -> Value {
        let sheets: Map<String, Value> = document
            .sheets
            .iter()
            .map(|sheet| {
                let value = json!({
                    "title": sheet.title,
                    "rowCount": sheet.row_count,
                    "columnCount": sheet.column_count,
                    "values": sheet.rows,
                });
                (sheet.title.clone(), value)
            })
            .collect();
        Value::Object(sheets)
    }
}
