//! Error types for the completion layer

use thiserror::Error;

/// Errors that can occur when requesting a chat completion
#[derive(Debug, Error)]
pub enum CompletionError {
    /// API key rejected
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// HTTP request failures with no structured provider error
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Connection-level failures (DNS, TLS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Quota or rate limit hit; reported, never retried
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Structured error returned by the provider
    #[error("Provider error ({code}): {message}")]
    Provider { code: String, message: String },

    /// Provider answered without any usable text
    #[error("Completion returned no content")]
    EmptyResponse,
}

impl From<serde_json::Error> for CompletionError {
    fn from(err: serde_json::Error) -> Self {
        CompletionError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return CompletionError::Serialization(err.to_string());
        }
        match err.status() {
            Some(status) => CompletionError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => CompletionError::Network(err.to_string()),
        }
    }
}
