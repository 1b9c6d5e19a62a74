//! Per-call model configuration.

use serde::{Deserialize, Serialize};

/// Model used when configuration does not name one.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Model id, temperature and output cap for one kind of call.
///
/// # Examples
///
/// ```
/// use kahovitz_core::{DEFAULT_MODEL, ModelConfig};
///
/// let config = ModelConfig::new(0.1, 10);
/// assert_eq!(config.model(), DEFAULT_MODEL);
/// assert_eq!(*config.max_tokens(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModelConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Maximum output tokens
    max_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl ModelConfig {
    /// Configuration for the default model.
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: default_model(),
            temperature,
            max_tokens,
        }
    }

    /// Replace the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(0.8, 500)
    }
}
