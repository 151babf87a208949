//! OpenAI provider implementation
//!
//! This module provides a non-streaming client for OpenAI's chat completion
//! API and any server exposing the same `/chat/completions` schema.

pub mod client;
pub mod mapper;
pub mod types;

// Re-export commonly used types
pub use client::{OpenAiClient, OpenAiConfig};
