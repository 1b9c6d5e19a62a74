//! Configuration for the Kahovitz services.
//!
//! The configuration system layers, from lowest to highest precedence:
//! - Bundled defaults (include_str! from kahovitz.toml)
//! - `~/.config/kahovitz/kahovitz.toml`
//! - `./kahovitz.toml`
//! - `KAHOVITZ_*` environment variables (`KAHOVITZ_STORY__SUMMARY_INTERVAL=5`)

use crate::Tier;
use config::{Config, Environment, File, FileFormat};
use kahovitz_core::ModelConfig;
use kahovitz_error::{ConfigError, KahovitzError, KahovitzResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../kahovitz.toml");

/// Configuration for a provider's API tier.
///
/// ```toml
/// [providers.groq.tiers.free]
/// name = "Free"
/// rpm = 30
/// rpd = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierConfig {
    /// Name of the tier (e.g., "Free", "Developer")
    pub name: String,

    /// Requests per minute limit
    #[serde(default)]
    pub rpm: Option<u32>,

    /// Requests per day limit
    #[serde(default)]
    pub rpd: Option<u32>,

    /// Maximum concurrent requests
    #[serde(default)]
    pub max_concurrent: Option<u32>,
}

impl TierConfig {
    /// Create a tier from explicit limits.
    pub fn new(
        name: impl Into<String>,
        rpm: Option<u32>,
        rpd: Option<u32>,
        max_concurrent: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            rpm,
            rpd,
            max_concurrent,
        }
    }
}

impl Tier for TierConfig {
    fn rpm(&self) -> Option<u32> {
        self.rpm
    }

    fn rpd(&self) -> Option<u32> {
        self.rpd
    }

    fn max_concurrent(&self) -> Option<u32> {
        self.max_concurrent
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Configuration for a specific provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Name of the default tier for this provider
    pub default_tier: String,

    /// Map of tier name to tier configuration
    pub tiers: HashMap<String, TierConfig>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5175,
        }
    }
}

/// Story pipeline defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorySettings {
    /// Turns generated when a request does not say
    pub total_utterances: usize,
    /// Turns between summaries when a request does not say
    pub summary_interval: usize,
    /// Honour caller-supplied character profiles
    pub character_profiles: bool,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            total_utterances: 20,
            summary_interval: 4,
            character_profiles: false,
        }
    }
}

/// Model configuration per persona role.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Plan refinement and opening scene
    pub planner: ModelConfig,
    /// Both dialogue characters
    pub character: ModelConfig,
    /// Interval summaries
    pub summarizer: ModelConfig,
    /// Narration
    pub narrator: ModelConfig,
    /// Master summary
    pub master: ModelConfig,
    /// Narration classifier
    pub classifier: ModelConfig,
    /// Social agents
    pub social: ModelConfig,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            planner: ModelConfig::new(0.8, 500),
            character: ModelConfig::new(0.8, 500),
            summarizer: ModelConfig::new(0.5, 300),
            narrator: ModelConfig::new(0.8, 200),
            master: ModelConfig::new(0.6, 500),
            classifier: ModelConfig::new(0.1, 10),
            social: ModelConfig::new(0.9, 280),
        }
    }
}

/// Session store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Idle time after which a session is swept
    pub ttl_secs: u64,
    /// Interval between sweeps
    pub sweep_interval_secs: u64,
    /// Interval between progress events on a stream
    pub poll_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 15 * 60,
            sweep_interval_secs: 60,
            poll_interval_ms: 1_000,
        }
    }
}

/// Posting retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostingSettings {
    /// Attempts including the first
    pub max_attempts: usize,
    /// Delay before the second attempt, doubled afterwards
    pub base_delay_ms: u64,
}

impl Default for PostingSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
        }
    }
}

/// Top-level Kahovitz configuration.
///
/// # Example
///
/// ```no_run
/// use kahovitz_rate_limit::KahovitzConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = KahovitzConfig::load()?;
/// println!("listening on {}", config.server.port);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct KahovitzConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Story pipeline defaults
    #[serde(default)]
    pub story: StorySettings,

    /// Model configuration per persona role
    #[serde(default)]
    pub models: ModelSettings,

    /// Session store settings
    #[serde(default)]
    pub sessions: SessionSettings,

    /// Posting retry settings
    #[serde(default)]
    pub posting: PostingSettings,

    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl KahovitzConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> KahovitzResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                KahovitzError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                KahovitzError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    #[instrument]
    pub fn load() -> KahovitzResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/kahovitz/kahovitz.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("kahovitz").required(false))
            .add_source(
                Environment::with_prefix("KAHOVITZ")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| {
                KahovitzError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                KahovitzError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Bundled defaults only, ignoring user files and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn bundled() -> KahovitzResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                KahovitzError::from(ConfigError::new(format!(
                    "Failed to parse bundled configuration: {}",
                    e
                )))
            })
    }

    /// Get tier configuration for a provider.
    ///
    /// Uses the provider's default tier when `tier_name` is `None`.
    #[instrument(skip(self))]
    pub fn get_tier(&self, provider: &str, tier_name: Option<&str>) -> Option<TierConfig> {
        let provider_config = self.providers.get(provider)?;

        let tier = tier_name.unwrap_or(&provider_config.default_tier);

        debug!(provider, tier, "Looking up tier configuration");

        provider_config.tiers.get(tier).cloned()
    }
}
