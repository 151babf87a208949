//! Shared fakes and helpers for the integration tests
#![allow(dead_code)]

pub mod responder;

use async_trait::async_trait;
use serde_json::{json, Value};
use sheet_analyst::llm::{CompletionError, CompletionProvider, CompletionRequest};
use sheet_analyst::sheets::{
    SheetTable, SpreadsheetAccessError, SpreadsheetDocument, SpreadsheetSource,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory spreadsheets keyed by id; unknown ids are reported as not found
#[derive(Default)]
pub struct FakeSheets {
    documents: HashMap<String, Vec<SheetTable>>,
    fetches: AtomicUsize,
}

impl FakeSheets {
    pub fn with_sheet(mut self, id: &str, title: &str, rows: Vec<Vec<Value>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let sheet = SheetTable::from_values(title, rows.len(), columns, rows);
        self.documents.entry(id.to_string()).or_default().push(sheet);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpreadsheetSource for FakeSheets {
    async fn fetch(&self, spreadsheet_id: &str) -> Result<SpreadsheetDocument, SpreadsheetAccessError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.documents.get(spreadsheet_id) {
            Some(sheets) => Ok(SpreadsheetDocument::new(spreadsheet_id, sheets.clone())),
            None => Err(SpreadsheetAccessError::NotFound(format!(
                "Requested entity was not found: {}",
                spreadsheet_id
            ))),
        }
    }
}

/// Replays scripted results in order and records every request
pub struct ScriptedProvider {
    script: Mutex<Vec<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(mut script: Vec<Result<String, CompletionError>>) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(CompletionError::EmptyResponse))
    }
}

/// Two numeric rows under a header, as in the trend question scenario
pub fn sales_rows() -> Vec<Vec<Value>> {
    vec![
        vec![json!("Month"), json!("Revenue")],
        vec![json!("Jan"), json!(100)],
        vec![json!("Feb"), json!(140)],
    ]
}
