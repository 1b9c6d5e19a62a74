//! Persona-driven chat agent with a rolling memory.

use crate::AgentPreset;
use kahovitz_core::{GenerateRequest, Message, ModelConfig};
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
use kahovitz_interface::KahovitzDriver;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Most messages an agent remembers; older ones are dropped first.
pub const MAX_HISTORY: usize = 5;

/// A chat agent with a fixed persona.
///
/// Each call sends `[persona, ...history, user message]` and records the
/// user message and the reply in the history.
pub struct SocialAgent {
    name: String,
    platform: String,
    persona: String,
    config: ModelConfig,
    driver: Arc<dyn KahovitzDriver>,
    history: Mutex<VecDeque<Message>>,
}

impl std::fmt::Debug for SocialAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialAgent")
            .field("name", &self.name)
            .field("platform", &self.platform)
            .field("config", &self.config)
            .field("provider", &self.driver.provider_name())
            .field("history", &self.history.lock().len())
            .finish()
    }
}

impl SocialAgent {
    /// Agent with a custom persona.
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        persona: impl Into<String>,
        config: ModelConfig,
        driver: Arc<dyn KahovitzDriver>,
    ) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            persona: persona.into(),
            config,
            driver,
            history: Mutex::new(VecDeque::with_capacity(MAX_HISTORY + 1)),
        }
    }

    /// Agent for a built-in preset.
    pub fn from_preset(preset: AgentPreset, driver: Arc<dyn KahovitzDriver>) -> Self {
        Self::new(
            preset.name(),
            preset.platform(),
            preset.persona(),
            preset.model_config(),
            driver,
        )
    }

    /// Replace the model configuration.
    pub fn with_model_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Agent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target platform.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Model configuration.
    pub fn model_config(&self) -> &ModelConfig {
        &self.config
    }

    /// Send a message and return the reply.
    ///
    /// History is only updated when the call succeeds.
    ///
    /// # Errors
    ///
    /// Returns the driver error, or an empty-response error if the reply has
    /// no text.
    #[instrument(skip(self, message), fields(agent = %self.name, msg_len = message.len()))]
    pub async fn chat(&self, message: &str) -> KahovitzResult<String> {
        let mut messages = Vec::with_capacity(MAX_HISTORY + 2);
        messages.push(Message::system(self.persona.as_str()));
        messages.extend(self.history.lock().iter().cloned());
        messages.push(Message::user(message));

        let request = GenerateRequest::with_config(messages, &self.config);
        let response = self.driver.generate(&request).await?;
        let reply = response
            .text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        let mut history = self.history.lock();
        history.push_back(Message::user(message));
        history.push_back(Message::assistant(reply.as_str()));
        while history.len() > MAX_HISTORY {
            history.pop_front();
        }
        debug!(memory = history.len(), "Reply recorded");

        Ok(reply)
    }

    /// Remembered messages, oldest first.
    pub fn history(&self) -> Vec<Message> {
        self.history.lock().iter().cloned().collect()
    }

    /// Forget every message.
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}
