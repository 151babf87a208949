//! Generation configuration parameters

use serde::{Deserialize, Serialize};

/// Chat model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature shared by both analysis prompts
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Output bound for the general spreadsheet analysis prompt
pub const GENERAL_MAX_TOKENS: u32 = 2000;

/// Output bound for the focused metrics prompt
pub const METRICS_MAX_TOKENS: u32 = 500;

/// Parameters for controlling text generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier sent to the provider
    pub model: String,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Randomness (0.0-2.0, higher = more random)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    /// Create a new configuration for `model` with the specified max tokens
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature: None,
        }
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Settings for the general analysis prompt
    pub fn general(model: impl Into<String>) -> Self {
        Self::new(model, GENERAL_MAX_TOKENS).with_temperature(DEFAULT_TEMPERATURE)
    }

    /// Settings for the focused metrics prompt
    pub fn metrics(model: impl Into<String>) -> Self {
        Self::new(model, METRICS_MAX_TOKENS).with_temperature(DEFAULT_TEMPERATURE)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::general(DEFAULT_MODEL)
    }
}
