//! Generate-and-post flow.

use crate::{ContentCategory, SocialAgent, sanitize_post_text};
use kahovitz_error::{KahovitzResult, PostingError, PostingErrorKind};
use kahovitz_interface::{PostedStatus, StatusPoster};
use kahovitz_rate_limit::{RetryPolicy, post_with_retry};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Result of one automatic post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPost {
    /// Published status
    pub status: PostedStatus,
    /// Sanitized text that was posted
    pub generated_content: String,
    /// Prompt given to the agent
    pub prompt: String,
    /// Category the prompt was drawn from
    pub category: ContentCategory,
}

/// Ask the agent for content and publish it.
///
/// Uses `prompt` when given, otherwise a random prompt from `category`. The
/// reply is sanitized before posting; posting rate limits are retried per
/// `policy`.
///
/// # Errors
///
/// Returns generation errors, an empty-text error when the reply sanitizes to
/// nothing, or the final posting error.
#[instrument(skip(agent, poster, policy, prompt), fields(agent = agent.name(), %category))]
pub async fn auto_post(
    agent: &SocialAgent,
    poster: &dyn StatusPoster,
    policy: &RetryPolicy,
    category: ContentCategory,
    prompt: Option<&str>,
) -> KahovitzResult<AutoPost> {
    let prompt = match prompt.map(str::trim).filter(|p| !p.is_empty()) {
        Some(custom) => custom.to_string(),
        None => category.random_prompt().to_string(),
    };
    info!(%prompt, "Generating post");

    let reply = agent.chat(&prompt).await?;
    let text = sanitize_post_text(&reply);
    if text.is_empty() {
        return Err(PostingError::new(PostingErrorKind::EmptyText).into());
    }

    let status = post_with_retry(policy, || poster.post(&text)).await?;

    Ok(AutoPost {
        status,
        generated_content: text,
        prompt,
        category,
    })
}
