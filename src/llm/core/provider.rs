//! Provider trait for chat-completion implementations

use async_trait::async_trait;

use super::{error::CompletionError, types::CompletionRequest};

/// Main interface that all completion providers must satisfy
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a complete answer for the request
    ///
    /// Exactly one round trip to the provider is made per call. There is no
    /// streaming and no retry; any failure is returned to the caller as is.
    ///
    /// # Arguments
    /// * `request` - System and user messages plus generation settings
    ///
    /// # Returns
    /// The generated text of the first choice, or an error if the call fails
    /// or the provider returned nothing usable
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
