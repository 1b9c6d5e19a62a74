//! Route table.

mod health;
mod social;
mod story;

use crate::AppState;
use axum::Router;
use axum::routing::{get, post};

/// All Kahovitz endpoints over one state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/plan", post(story::plan))
        .route("/api/generate-story", post(story::generate_story))
        .route("/api/generate-story-stream", get(story::generate_story_stream))
        .route("/health", get(health::health))
        .route("/post", get(social::post))
        .route("/auto-tweet", get(social::auto_tweet))
        .route("/generate", get(social::generate))
        .route("/test-xvitz", get(social::test_xvitz))
        .route("/memory", get(social::memory))
        .route("/clear-memory", get(social::clear_memory))
        .route("/diagnose", get(social::diagnose))
        .route("/test", get(social::test))
        .with_state(state)
}
