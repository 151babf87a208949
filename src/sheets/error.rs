//! Error types for spreadsheet access

use thiserror::Error;

use super::types::GoogleErrorEnvelope;

/// Errors that can occur while reading a spreadsheet
#[derive(Debug, Error)]
pub enum SpreadsheetAccessError {
    /// Service-account credential could not be loaded or exchanged for a token
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Token accepted but access to the document was refused
    #[error("Access denied: {0}")]
    Unauthorized(String),

    /// Unknown spreadsheet identifier
    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    /// Identifier or range rejected by the service
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Service unreachable
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-2xx response
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Response body did not match the expected schema
    #[error("Malformed sheet data: {0}")]
    MalformedResponse(String),
}

impl SpreadsheetAccessError {
    /// Classify a non-2xx response from the Sheets API
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<GoogleErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.to_string());

        match status {
            401 | 403 => SpreadsheetAccessError::Unauthorized(message),
            404 => SpreadsheetAccessError::NotFound(message),
            400 => SpreadsheetAccessError::InvalidRequest(message),
            _ => SpreadsheetAccessError::Http {
                status,
                body: message,
            },
        }
    }
}

impl From<reqwest::Error> for SpreadsheetAccessError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return SpreadsheetAccessError::MalformedResponse(err.to_string());
        }
        match err.status() {
            Some(status) => SpreadsheetAccessError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => SpreadsheetAccessError::Network(err.to_string()),
        }
    }
}

impl From<gcp_auth::Error> for SpreadsheetAccessError {
    fn from(err: gcp_auth::Error) -> Self {
        SpreadsheetAccessError::Authentication(format!("Failed to get token: {}", err))
    }
}
