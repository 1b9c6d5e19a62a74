//! Generic client for OpenAI-compatible chat-completion endpoints.

use crate::{ChatCompletionRequestBuilder, ChatCompletionResponse, ChatMessage};
use kahovitz_core::{GenerateRequest, GenerateResponse, Output};
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
use kahovitz_rate_limit::{RateLimiter, TierConfig};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument};

/// Client for any endpoint speaking the OpenAI chat-completion format.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
    limiter: Option<RateLimiter<TierConfig>>,
}

impl OpenAICompatibleClient {
    /// Creates a client for `endpoint` authenticated with a bearer key.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            provider,
            limiter: None,
        }
    }

    /// Replace the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Pace requests through a rate limiter.
    pub fn with_rate_limiter(mut self, limiter: RateLimiter<TierConfig>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Default model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Provider name used in logs.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one chat-completion request.
    ///
    /// # Errors
    ///
    /// Returns a generation error on transport failure, non-success status,
    /// undecodable body, or a response without text.
    #[instrument(skip(self, req), fields(provider = self.provider, messages = req.messages().len()))]
    pub async fn generate(&self, req: &GenerateRequest) -> KahovitzResult<GenerateResponse> {
        let model = req.model().clone().unwrap_or_else(|| self.model.clone());

        let body = ChatCompletionRequestBuilder::default()
            .model(model)
            .messages(
                req.messages()
                    .iter()
                    .map(ChatMessage::from)
                    .collect::<Vec<_>>(),
            )
            .max_tokens(*req.max_tokens())
            .temperature(*req.temperature())
            .stream(Some(false))
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))?;

        let _guard = match &self.limiter {
            Some(limiter) => Some(limiter.acquire().await?),
            None => None,
        };

        debug!(model = %body.model, "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Chat completion request failed");
                GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Provider returned error");
            let kind = match status {
                StatusCode::TOO_MANY_REQUESTS => GenerationErrorKind::RateLimit(message),
                StatusCode::NOT_FOUND => GenerationErrorKind::ModelNotFound(body.model),
                _ => GenerationErrorKind::Api {
                    status: status.as_u16(),
                    message,
                },
            };
            return Err(GenerationError::new(kind).into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::ResponseParsing(e.to_string()))
        })?;

        let outputs: Vec<Output> = completion
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .map(Output::Text)
            .collect();

        if outputs.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        debug!(outputs = outputs.len(), "Received chat completion");
        Ok(GenerateResponse::new(outputs))
    }
}
