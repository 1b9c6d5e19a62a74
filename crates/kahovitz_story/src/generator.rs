//! Persona-routed content generation.

use crate::PersonaRole;
use kahovitz_core::{GenerateRequest, Message, ModelConfig};
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
use kahovitz_interface::KahovitzDriver;
use kahovitz_models::GroqDriver;
use kahovitz_rate_limit::{ModelSettings, RateLimiter, TierConfig};
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Environment variable used when a persona's own credential is missing.
pub(crate) const FALLBACK_CREDENTIAL: &str = "GROQ_API_KEY";

/// Routes each persona role to its driver and model configuration.
///
/// One call is one `system + user` exchange; errors from the driver are
/// returned unchanged.
#[derive(Clone)]
pub struct ContentGenerator {
    drivers: HashMap<PersonaRole, Arc<dyn KahovitzDriver>>,
    models: ModelSettings,
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut roles: Vec<_> = self.drivers.keys().map(ToString::to_string).collect();
        roles.sort();
        f.debug_struct("ContentGenerator")
            .field("roles", &roles)
            .finish()
    }
}

impl ContentGenerator {
    /// Generator with no drivers registered.
    pub fn new(models: ModelSettings) -> Self {
        Self {
            drivers: HashMap::new(),
            models,
        }
    }

    /// Generator routing every role to one driver.
    pub fn uniform(driver: Arc<dyn KahovitzDriver>, models: ModelSettings) -> Self {
        let drivers = PersonaRole::iter()
            .map(|role| (role, Arc::clone(&driver)))
            .collect();
        Self { drivers, models }
    }

    /// Register the driver for one role.
    pub fn with_driver(mut self, role: PersonaRole, driver: Arc<dyn KahovitzDriver>) -> Self {
        self.drivers.insert(role, driver);
        self
    }

    /// Build Groq drivers from the persona credentials in the environment.
    ///
    /// A role whose own key (`GROQ_1`..`GROQ_5`) is unset uses `GROQ_API_KEY`;
    /// a role with neither stays unregistered and its calls fail with a
    /// missing-credential error.
    #[instrument(skip_all)]
    pub fn from_env(models: ModelSettings, limiter: Option<RateLimiter<TierConfig>>) -> Self {
        let mut by_var: HashMap<&'static str, Arc<dyn KahovitzDriver>> = HashMap::new();
        let mut generator = Self::new(models);

        for role in PersonaRole::iter() {
            let var = role.credential_var();

            if let Some(driver) = by_var.get(var) {
                generator.drivers.insert(role, Arc::clone(driver));
                continue;
            }

            let key = env_key(var).or_else(|| {
                let fallback = env_key(FALLBACK_CREDENTIAL);
                if fallback.is_some() {
                    warn!(%role, var, "Persona credential missing, using {}", FALLBACK_CREDENTIAL);
                }
                fallback
            });

            match key {
                Some(key) => {
                    let model = role.model_config(&generator.models).model().clone();
                    let mut driver = GroqDriver::with_api_key(key, model);
                    if let Some(limiter) = &limiter {
                        driver = driver.with_rate_limiter(limiter.clone());
                    }
                    let driver: Arc<dyn KahovitzDriver> = Arc::new(driver);
                    by_var.insert(var, Arc::clone(&driver));
                    generator.drivers.insert(role, driver);
                }
                None => warn!(%role, var, "No credential for persona"),
            }
        }

        info!(
            registered = generator.drivers.len(),
            "Content generator initialized"
        );
        generator
    }

    /// Whether a driver is registered for the role.
    pub fn has_driver(&self, role: PersonaRole) -> bool {
        self.drivers.contains_key(&role)
    }

    /// Model configuration for the role.
    pub fn model_config(&self, role: PersonaRole) -> &ModelConfig {
        role.model_config(&self.models)
    }

    /// Generate text as `role` with the role's model configuration.
    ///
    /// # Errors
    ///
    /// Returns error if no driver is registered for the role, the driver
    /// fails, or the response has no text.
    pub async fn generate(
        &self,
        role: PersonaRole,
        system_prompt: &str,
        user_prompt: &str,
    ) -> KahovitzResult<String> {
        let config = self.model_config(role).clone();
        self.generate_with(role, system_prompt, user_prompt, &config)
            .await
    }

    /// Generate text as `role` with an explicit model configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ContentGenerator::generate`].
    #[instrument(skip(self, system_prompt, user_prompt, config), fields(%role, model = %config.model()))]
    pub async fn generate_with(
        &self,
        role: PersonaRole,
        system_prompt: &str,
        user_prompt: &str,
        config: &ModelConfig,
    ) -> KahovitzResult<String> {
        let driver = self.drivers.get(&role).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MissingCredential(
                role.credential_var().to_string(),
            ))
        })?;

        let request = GenerateRequest::with_config(
            vec![Message::system(system_prompt), Message::user(user_prompt)],
            config,
        );

        let response = driver.generate(&request).await?;
        let text = response
            .text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        debug!(chars = text.chars().count(), "Generated content");
        Ok(text)
    }
}

fn env_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|key| !key.trim().is_empty())
}
