//! Groq LPU inference driver.

use crate::OpenAICompatibleClient;
use async_trait::async_trait;
use kahovitz_core::{GenerateRequest, GenerateResponse};
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
use kahovitz_interface::KahovitzDriver;
use kahovitz_rate_limit::{RateLimiter, TierConfig};
use tracing::instrument;

/// Groq's OpenAI-compatible chat-completion endpoint.
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq chat-completion driver.
#[derive(Debug, Clone)]
pub struct GroqDriver {
    inner: OpenAICompatibleClient,
}

impl GroqDriver {
    /// Creates a driver keyed by `GROQ_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns error if `GROQ_API_KEY` is not set.
    pub fn new(model: impl Into<String>) -> KahovitzResult<Self> {
        Self::from_env("GROQ_API_KEY", model)
    }

    /// Creates a driver keyed by the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns error if the variable is not set or empty.
    #[instrument(skip(model))]
    pub fn from_env(var: &str, model: impl Into<String>) -> KahovitzResult<Self> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingCredential(var.to_string()))
            })?;

        Ok(Self::with_api_key(api_key, model))
    }

    /// Creates a driver with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: OpenAICompatibleClient::new(api_key, model, GROQ_CHAT_URL, "groq"),
        }
    }

    /// Point the driver at another endpoint (a proxy or a test server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.inner = self.inner.with_endpoint(endpoint);
        self
    }

    /// Pace requests through a rate limiter.
    pub fn with_rate_limiter(mut self, limiter: RateLimiter<TierConfig>) -> Self {
        self.inner = self.inner.with_rate_limiter(limiter);
        self
    }
}

#[async_trait]
impl KahovitzDriver for GroqDriver {
    #[instrument(skip(self, req), fields(provider = "groq", model = %self.inner.model_name()))]
    async fn generate(&self, req: &GenerateRequest) -> KahovitzResult<GenerateResponse> {
        self.inner.generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
