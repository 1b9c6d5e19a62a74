//! Request and response types for LLM generation.

use crate::{Message, ModelConfig, Output};
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// # Examples
///
/// ```
/// use kahovitz_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(Some(100))
///     .temperature(Some(0.7))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.max_tokens(), Some(100));
/// assert!(request.model().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier to use, overriding the driver default
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Build a request from a message list and a model configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use kahovitz_core::{GenerateRequest, Message, ModelConfig};
    ///
    /// let config = ModelConfig::new(0.5, 300);
    /// let request = GenerateRequest::with_config(vec![Message::user("hi")], &config);
    /// assert_eq!(*request.max_tokens(), Some(300));
    /// assert_eq!(request.model().as_deref(), Some("llama-3.3-70b-versatile"));
    /// ```
    pub fn with_config(messages: Vec<Message>, config: &ModelConfig) -> Self {
        Self {
            messages,
            max_tokens: Some(*config.max_tokens()),
            temperature: Some(*config.temperature()),
            model: Some(config.model().clone()),
        }
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use kahovitz_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::new(vec![Output::Text("Hello!".to_string())]);
/// assert_eq!(response.text().as_deref(), Some("Hello!"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Wrap a list of outputs.
    pub fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }

    /// Concatenated text outputs, or `None` when the response has no text.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::Json(_) => None,
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}
