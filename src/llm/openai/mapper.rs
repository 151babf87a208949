//! Mapping between completion-layer types and OpenAI wire types

use crate::llm::core::{
    error::CompletionError,
    types::{ChatMessage, CompletionRequest},
};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope, OpenAiMessage};

/// Convert our request to the OpenAI request body
pub fn to_openai_request(request: CompletionRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: request.config.model,
        messages: request.messages.into_iter().map(to_openai_message).collect(),
        temperature: request.config.temperature,
        max_tokens: request.config.max_tokens,
    }
}

fn to_openai_message(message: ChatMessage) -> OpenAiMessage {
    OpenAiMessage {
        role: message.role.as_str().to_string(),
        content: message.content,
    }
}

/// Extract the answer text from the first choice
///
/// Content is forwarded as-is, blank or not; only a missing choice or a null
/// content is an error.
pub fn from_openai_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

/// Classify a non-2xx response
pub fn from_error_response(status: u16, body: &str) -> CompletionError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

    match (status, parsed) {
        (401, Some(envelope)) => CompletionError::Authentication(envelope.error.message),
        (401, None) => CompletionError::Authentication(body.to_string()),
        (429, Some(envelope)) => CompletionError::RateLimited(envelope.error.message),
        (429, None) => CompletionError::RateLimited(body.to_string()),
        (_, Some(envelope)) => {
            let code = match envelope.error.code {
                Some(serde_json::Value::String(code)) => code,
                Some(serde_json::Value::Number(code)) => code.to_string(),
                _ => envelope
                    .error
                    .error_type
                    .unwrap_or_else(|| status.to_string()),
            };
            CompletionError::Provider {
                code,
                message: envelope.error.message,
            }
        }
        (_, None) => CompletionError::Http {
            status,
            body: body.to_string(),
        },
    }
}
