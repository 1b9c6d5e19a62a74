//! Social posting command handler.

use kahovitz::{
    AgentPreset, ContentCategory, GroqDriver, KahovitzConfig, KahovitzDriver, RateLimiter,
    RetryPolicy, SocialAgent, StatusPoster, XClient, auto_post, sanitize_post_text,
};
use std::sync::Arc;
use tracing::info;

fn agent(config: &KahovitzConfig) -> anyhow::Result<SocialAgent> {
    let social = config.models.social.clone();
    let mut driver = GroqDriver::new(social.model().clone())?;
    if let Some(tier) = config.get_tier("groq", None) {
        driver = driver.with_rate_limiter(RateLimiter::new(tier));
    }
    let driver: Arc<dyn KahovitzDriver> = Arc::new(driver);
    Ok(SocialAgent::from_preset(AgentPreset::Xvitz, driver).with_model_config(social))
}

/// Handle the `auto-tweet` command
pub async fn auto_tweet(
    config: KahovitzConfig,
    category: &str,
    prompt: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let agent = agent(&config)?;
    let category = ContentCategory::lenient(category);

    if dry_run {
        let prompt = match prompt.map(str::trim).filter(|p| !p.is_empty()) {
            Some(custom) => custom.to_string(),
            None => category.random_prompt().to_string(),
        };
        let reply = agent.chat(&prompt).await?;
        println!("Prompt: {}\n\n{}", prompt, sanitize_post_text(&reply));
        return Ok(());
    }

    let client = XClient::from_env()?;
    let policy = RetryPolicy::from(&config.posting);
    let post = auto_post(&agent, &client, &policy, category, prompt).await?;
    info!(id = %post.status.id, category = %post.category, "Posted");

    println!("Prompt: {}\n\n{}", post.prompt, post.generated_content);
    match client.verify_credentials().await {
        Ok(account) => println!("\n{}", account.status_url(&post.status.id)),
        Err(e) => println!("\nPosted status {} ({})", post.status.id, e),
    }

    Ok(())
}
