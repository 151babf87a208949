//! Completion layer
//!
//! This module provides a provider-neutral interface for one-shot chat
//! completions and an OpenAI-compatible implementation of it.

pub mod core;
pub mod openai;

// Re-export commonly used types
pub use core::{
    config::GenerationConfig,
    error::CompletionError,
    provider::CompletionProvider,
    types::{ChatMessage, ChatRole, CompletionRequest},
};

pub use openai::{OpenAiClient, OpenAiConfig};
