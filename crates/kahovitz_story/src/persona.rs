//! Persona roles and their credentials.

use kahovitz_core::ModelConfig;
use kahovitz_rate_limit::ModelSettings;
use serde::{Deserialize, Serialize};

/// A persona the pipeline calls the model as.
///
/// Each role is keyed by its own environment credential so calls can be
/// spread across separate provider accounts.
///
/// # Examples
///
/// ```
/// use kahovitz_story::PersonaRole;
///
/// assert_eq!(PersonaRole::CharacterA.credential_var(), "GROQ_1");
/// assert_eq!(PersonaRole::Classifier.credential_var(), "GROQ_5");
/// assert_eq!(PersonaRole::MasterSummarizer.to_string(), "master_summarizer");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PersonaRole {
    /// Prompt refinement and opening scene
    Planner,
    /// First speaker
    CharacterA,
    /// Second speaker
    CharacterB,
    /// Interval summaries
    Summarizer,
    /// Narrator interjections
    Narrator,
    /// Final summary of summaries
    MasterSummarizer,
    /// Narration yes/no classifier
    Classifier,
}

impl PersonaRole {
    /// Environment variable holding this role's API key.
    pub fn credential_var(self) -> &'static str {
        match self {
            Self::CharacterA => "GROQ_1",
            Self::CharacterB => "GROQ_2",
            Self::Planner | Self::Summarizer | Self::Narrator => "GROQ_3",
            Self::MasterSummarizer => "GROQ_4",
            Self::Classifier => "GROQ_5",
        }
    }

    /// Speaker role for a character index (0 or 1).
    pub fn character(index: usize) -> Self {
        if index % 2 == 0 {
            Self::CharacterA
        } else {
            Self::CharacterB
        }
    }

    /// Model configuration for this role.
    pub fn model_config(self, settings: &ModelSettings) -> &ModelConfig {
        match self {
            Self::Planner => &settings.planner,
            Self::CharacterA | Self::CharacterB => &settings.character,
            Self::Summarizer => &settings.summarizer,
            Self::Narrator => &settings.narrator,
            Self::MasterSummarizer => &settings.master,
            Self::Classifier => &settings.classifier,
        }
    }
}
