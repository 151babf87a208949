//! OpenAI-compatible chat completion client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::llm::core::{
    error::CompletionError, provider::CompletionProvider, types::CompletionRequest,
};

use super::mapper::{from_error_response, from_openai_response, to_openai_request};
use super::types::ChatCompletionResponse;

/// Public OpenAI endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the completion service
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Bearer token
    pub api_key: String,
    /// API root, without the trailing `/chat/completions`
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Credentials and endpoint
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CompletionError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Build the completion endpoint URL
    fn build_endpoint_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = to_openai_request(request);
        tracing::debug!(model = %body.model, max_tokens = body.max_tokens, "requesting completion");

        let response = self
            .http_client
            .post(self.build_endpoint_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_error_response(status.as_u16(), &body));
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        if let Some(usage) = parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion finished"
            );
        }

        from_openai_response(parsed)
    }
}
