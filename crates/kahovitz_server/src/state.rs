//! Shared application state.

use crate::SessionStore;
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult, PostingError, PostingErrorKind};
use kahovitz_interface::{KahovitzDriver, NarrationClassifier, StatusPoster};
use kahovitz_models::GroqDriver;
use kahovitz_rate_limit::{KahovitzConfig, RateLimiter, RetryPolicy};
use kahovitz_social::{AgentPreset, SocialAgent, XClient};
use kahovitz_story::{
    ContentGenerator, GroqClassifier, PersonaRole, StoryOrchestrator, StoryPlanner,
};
use std::sync::Arc;
use strum::IntoEnumIterator;
use std::time::Duration;
use tracing::{info, warn};

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    config: Arc<KahovitzConfig>,
    sessions: Arc<SessionStore>,
    generator: Arc<ContentGenerator>,
    planner: StoryPlanner,
    orchestrator: StoryOrchestrator,
    agent: Option<Arc<SocialAgent>>,
    poster: Option<Arc<dyn StatusPoster>>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("agent", &self.agent)
            .field("poster", &self.poster.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// State over an explicit generator and classifier, without social posting.
    pub fn new(
        config: KahovitzConfig,
        generator: Arc<ContentGenerator>,
        classifier: Arc<dyn NarrationClassifier>,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.sessions.ttl_secs,
        )));
        let retry = RetryPolicy::from(&config.posting);
        Self {
            planner: StoryPlanner::new(generator.clone()),
            orchestrator: StoryOrchestrator::new(generator.clone(), classifier),
            generator,
            config: Arc::new(config),
            sessions,
            agent: None,
            poster: None,
            retry,
        }
    }

    /// State wired from environment credentials.
    ///
    /// Story personas use `GROQ_1`..`GROQ_5`, the social agent uses
    /// `GROQ_API_KEY`, posting uses the `TWITTER_*` credentials. Missing
    /// credentials are logged; the affected endpoints fail when called.
    pub fn from_env(config: KahovitzConfig) -> Self {
        let limiter = config.get_tier("groq", None).map(|tier| {
            info!(tier = %tier.name, "Rate limiting Groq requests");
            RateLimiter::new(tier)
        });

        let generator = Arc::new(ContentGenerator::from_env(
            config.models.clone(),
            limiter.clone(),
        ));
        let classifier = Arc::new(GroqClassifier::new(generator.clone()));
        let social_config = config.models.social.clone();
        let mut state = Self::new(config, generator, classifier);

        let missing = state.personas_without_driver();
        if !missing.is_empty() {
            warn!(?missing, "Story personas without a driver");
        }

        match GroqDriver::new(social_config.model().clone()) {
            Ok(driver) => {
                let driver = match limiter {
                    Some(limiter) => driver.with_rate_limiter(limiter),
                    None => driver,
                };
                let driver: Arc<dyn KahovitzDriver> = Arc::new(driver);
                let agent = SocialAgent::from_preset(AgentPreset::Xvitz, driver)
                    .with_model_config(social_config);
                state = state.with_agent(Arc::new(agent));
            }
            Err(e) => warn!(error = %e, "Social agent disabled"),
        }

        match XClient::from_env() {
            Ok(client) => state = state.with_poster(Arc::new(client)),
            Err(e) => warn!(error = %e, "Posting disabled"),
        }

        state
    }

    /// Use this social agent.
    pub fn with_agent(mut self, agent: Arc<SocialAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Use this posting client.
    pub fn with_poster(mut self, poster: Arc<dyn StatusPoster>) -> Self {
        self.poster = Some(poster);
        self
    }

    /// Loaded configuration.
    pub fn config(&self) -> &KahovitzConfig {
        &self.config
    }

    /// Streaming session store.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Story personas with no registered driver, in role order.
    pub fn personas_without_driver(&self) -> Vec<PersonaRole> {
        PersonaRole::iter()
            .filter(|role| !self.generator.has_driver(*role))
            .collect()
    }

    pub(crate) fn planner(&self) -> &StoryPlanner {
        &self.planner
    }

    pub(crate) fn orchestrator(&self) -> &StoryOrchestrator {
        &self.orchestrator
    }

    pub(crate) fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    pub(crate) fn agent_if_configured(&self) -> Option<&Arc<SocialAgent>> {
        self.agent.as_ref()
    }

    pub(crate) fn agent(&self) -> KahovitzResult<&Arc<SocialAgent>> {
        self.agent.as_ref().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MissingCredential(
                "GROQ_API_KEY".to_string(),
            ))
            .into()
        })
    }

    pub(crate) fn poster(&self) -> KahovitzResult<&Arc<dyn StatusPoster>> {
        self.poster.as_ref().ok_or_else(|| {
            PostingError::new(PostingErrorKind::MissingCredential(
                "TWITTER_APP_KEY".to_string(),
            ))
            .into()
        })
    }
}
