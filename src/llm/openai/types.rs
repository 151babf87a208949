//! OpenAI-compatible chat completion request and response types
//!
//! These types map directly to the `/chat/completions` wire schema.

use serde::{Deserialize, Serialize};

/// Body of a non-streaming chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation, system message first
    pub messages: Vec<OpenAiMessage>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token bound
    pub max_tokens: u32,
}

/// A single role-tagged message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    /// Text content
    pub content: String,
}

/// Successful completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    #[serde(default)]
    pub id: Option<String>,
    /// Model that served the request
    #[serde(default)]
    pub model: Option<String>,
    /// Generated alternatives; the pipeline only reads the first
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token accounting
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One generated alternative
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a choice; content is null for refusals and tool calls
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Usage metadata
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

/// Error details
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Human-readable message
    pub message: String,
    /// Error category, e.g. "invalid_request_error"
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Machine code; providers send either a string or a number
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}
