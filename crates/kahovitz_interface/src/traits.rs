//! Trait definitions for outbound collaborators.

use crate::{PostedStatus, PosterAccount, ProgressUpdate};
use async_trait::async_trait;
use kahovitz_core::{GenerateRequest, GenerateResponse};
use kahovitz_error::KahovitzResult;

/// Core trait that all text-generation backends implement.
#[async_trait]
pub trait KahovitzDriver: Send + Sync {
    /// Generate model output for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> KahovitzResult<GenerateResponse>;

    /// Provider name (e.g., "groq").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// Decides whether a summary warrants narration.
///
/// Implementations never fail: a classifier that cannot reach its backend
/// answers `false`.
#[async_trait]
pub trait NarrationClassifier: Send + Sync {
    /// Classify a summary.
    async fn classify(&self, summary: &str) -> bool;
}

/// Publishes short text posts to a social platform.
#[async_trait]
pub trait StatusPoster: Send + Sync {
    /// Publish a post and return the created status.
    async fn post(&self, text: &str) -> KahovitzResult<PostedStatus>;

    /// Look up the authenticated account.
    async fn verify_credentials(&self) -> KahovitzResult<PosterAccount>;
}

/// Receives progress reports from a running story.
///
/// Reports are delivered synchronously from the run's task and must not block.
pub trait ProgressSink: Send + Sync {
    /// Record a progress report.
    fn report(&self, update: ProgressUpdate);
}

/// Progress sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _update: ProgressUpdate) {}
}
