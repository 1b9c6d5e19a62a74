//! Configuration, rate limiting and retry for the Kahovitz services.
//!
//! - [`KahovitzConfig`] layers the bundled `kahovitz.toml` with user overrides
//! - [`RateLimiter`] paces outbound generation requests per provider tier
//! - [`post_with_retry`] retries posting calls the provider rate-limited

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;
mod retry;
mod tier;

pub use config::{
    KahovitzConfig, ModelSettings, PostingSettings, ProviderConfig, ServerSettings,
    SessionSettings, StorySettings, TierConfig,
};
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use retry::{RetryPolicy, post_with_retry, rate_limit_delay};
pub use tier::Tier;
