//! Date + two-metric projection for the focused metrics prompt

use serde_json::{Map, Value};

use super::projection::SheetProjection;
use crate::sheets::{SheetTable, SpreadsheetDocument};

/// How a column is located in a sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Zero-based position
    Index(usize),
    /// Header text, matched trimmed and case-insensitively
    Header(String),
}

impl ColumnRef {
    /// Unsigned integers are positions, anything else is a header name
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Header(raw.to_string()),
        }
    }

    fn resolve(&self, header: &[String]) -> Option<usize> {
        match self {
            ColumnRef::Index(index) => Some(*index),
            ColumnRef::Header(name) => header
                .iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(name.trim())),
        }
    }
}

/// A metric column and the key it is reported under
#[derive(Debug, Clone, PartialEq)]
pub struct MetricColumn {
    pub label: String,
    pub column: ColumnRef,
}

impl MetricColumn {
    pub fn new(label: impl Into<String>, column: ColumnRef) -> Self {
        Self {
            label: label.into(),
            column,
        }
    }
}

/// One extracted row
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub date: String,
    pub first: f64,
    pub second: f64,
}

/// Extracts `{date, first, second}` rows from one named sheet
///
/// The sheet's first row is its header. A data row is kept only when it has
/// a date and at least one non-zero metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsProjection {
    pub sheet_title: String,
    pub date: ColumnRef,
    pub first: MetricColumn,
    pub second: MetricColumn,
}

impl MetricsProjection {
    pub fn new(
        sheet_title: impl Into<String>,
        date: ColumnRef,
        first: MetricColumn,
        second: MetricColumn,
    ) -> Self {
        Self {
            sheet_title: sheet_title.into(),
            date,
            first,
            second,
        }
    }

    /// All retained rows of the configured sheet; empty when the sheet is absent
    pub fn records(&self, document: &SpreadsheetDocument) -> Vec<MetricRecord> {
        match document.sheet(&self.sheet_title) {
            Some(sheet) => self.sheet_records(sheet),
            None => {
                tracing::warn!(sheet = %self.sheet_title, spreadsheet_id = %document.id, "metrics sheet not found");
                Vec::new()
            }
        }
    }

    fn sheet_records(&self, sheet: &SheetTable) -> Vec<MetricRecord> {
        let header = sheet.header().unwrap_or(&[]);
        let (Some(date), Some(first), Some(second)) = (
            self.date.resolve(header),
            self.first.column.resolve(header),
            self.second.column.resolve(header),
        ) else {
            tracing::warn!(sheet = %sheet.title, "metrics columns not found in header");
            return Vec::new();
        };

        sheet
            .data_rows()
            .iter()
            .filter_map(|row| extract_row(row, date, first, second))
            .collect()
    }

    fn record_value(&self, record: &MetricRecord) -> Value {
        let mut object = Map::new();
        object.insert("date".to_string(), Value::String(record.date.clone()));
        object.insert(self.first.label.clone(), number(record.first));
        object.insert(self.second.label.clone(), number(record.second));
        Value::Object(object)
    }
}

impl SheetProjection for MetricsProjection {
    fn project(&self, document: &SpreadsheetDocument) -> Value {
        Value::Array(
            self.records(document)
                .iter()
                .map(|record| self.record_value(record))
                .collect(),
        )
    }
}

/// Pull one record out of a row by position
///
/// Returns `None` when the date cell is blank or both metrics coerce to zero.
pub fn extract_row(row: &[String], date: usize, first: usize, second: usize) -> Option<MetricRecord> {
    let date = row.get(date).map(|cell| cell.trim()).unwrap_or_default();
    if date.is_empty() {
        return None;
    }

    let first = coerce_metric(row.get(first).map(String::as_str));
    let second = coerce_metric(row.get(second).map(String::as_str));
    if first == 0.0 && second == 0.0 {
        return None;
    }

    Some(MetricRecord {
        date: date.to_string(),
        first,
        second,
    })
}

/// Missing, unparseable and non-finite cells all read as zero
pub fn coerce_metric(cell: Option<&str>) -> f64 {
    cell.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
