//! Social agents and X (Twitter) posting for Kahovitz.
//!
//! - [`SocialAgent`] is a persona-driven chat agent with a short rolling memory
//! - [`ContentCategory`] holds the canned prompts used for automatic posts
//! - [`XClient`] publishes posts through the X API v2, signed with OAuth 1.0a
//!   or a bearer token
//! - [`auto_post`] ties the three together: prompt, generate, sanitize, post

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod content;
mod oauth;
mod persona;
mod publish;
mod sanitize;
mod x_client;

pub use agent::{MAX_HISTORY, SocialAgent};
pub use content::{ContentCategory, random_category, random_prompt};
pub use oauth::OAuth1Credentials;
pub use persona::AgentPreset;
pub use publish::{AutoPost, auto_post};
pub use sanitize::{MAX_POST_CHARS, sanitize_post_text};
pub use x_client::{X_API_URL, XAuth, XClient, XCredentialStatus};
