//! Kahovitz - multi-agent story generation and social posting
//!
//! Kahovitz turns a rough story idea into a multi-character dialogue using a
//! cast of Groq-backed personas (planner, two characters, summarizer,
//! narrator), and drives social agents that write and publish short posts to
//! X (Twitter).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kahovitz::{AppState, KahovitzConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = KahovitzConfig::load()?;
//!     let addr = format!("{}:{}", config.server.host, config.server.port);
//!     serve(AppState::from_env(config), &addr).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `kahovitz_error` - Error types
//! - `kahovitz_core` - Messages, requests and the story data model
//! - `kahovitz_interface` - Driver, classifier, posting and progress traits
//! - `kahovitz_rate_limit` - Configuration, rate limiting and posting retry
//! - `kahovitz_models` - Groq chat-completions driver
//! - `kahovitz_story` - Planner, orchestrator and Markdown renderer
//! - `kahovitz_social` - Social agents and the X client
//! - `kahovitz_server` - HTTP endpoints and streaming sessions
//!
//! This crate re-exports everything for convenience.

pub use kahovitz_core::*;
pub use kahovitz_error::*;
pub use kahovitz_interface::*;
pub use kahovitz_rate_limit::*;

pub use kahovitz_models::{GROQ_CHAT_URL, GroqDriver};
pub use kahovitz_server::{ApiError, AppState, SessionSink, SessionStore, router, serve};
pub use kahovitz_social::{
    AgentPreset, AutoPost, ContentCategory, MAX_HISTORY, MAX_POST_CHARS, OAuth1Credentials,
    SocialAgent, X_API_URL, XAuth, XClient, XCredentialStatus, auto_post, random_category,
    random_prompt, sanitize_post_text,
};
pub use kahovitz_story::{
    ContentGenerator, GroqClassifier, PersonaRole, StoryOptions, StoryOrchestrator, StoryOutcome,
    StoryPlanner, StoryRequest, parse_plan_response, render_markdown, select_phase,
};
