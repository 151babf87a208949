use crate::llm::CompletionError;
use crate::sheets::SpreadsheetAccessError;

/// Inbound frame could not be turned into an analysis request
#[derive(Debug, thiserror::Error)]
pub enum MessageParseError {
    /// Not JSON, or missing required fields
    #[error("Invalid message: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Binary frame that is not UTF-8
    #[error("Message is not valid UTF-8")]
    InvalidEncoding,
}

/// Errors that can occur during one pipeline run
///
/// Display is the wrapped error's own message.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetAccessError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] MessageParseError),
}

impl PipelineError {
    /// Stable code reported alongside the human-readable message
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Spreadsheet(_) => "spreadsheet_access",
            PipelineError::Completion(_) => "completion",
            PipelineError::Parse(_) => "message_parse",
        }
    }
}
