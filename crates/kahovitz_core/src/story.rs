//! Story data model produced by the pipeline.

use serde::{Deserialize, Serialize};

/// Narrative phase a turn belongs to.
///
/// # Examples
///
/// ```
/// use kahovitz_core::Phase;
///
/// assert_eq!(Phase::RisingAction.to_string(), "risingAction");
/// assert_eq!(
///     serde_json::to_string(&Phase::Climax).unwrap(),
///     "\"climax\""
/// );
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
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Phase {
    /// Introduction of characters and world
    Setup,
    /// Building tension
    RisingAction,
    /// Peak of the conflict
    Climax,
    /// Conclusion
    Resolution,
}

/// Free-text description of each phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePlan {
    /// Setup description
    #[serde(default)]
    pub setup: String,
    /// Rising action description
    #[serde(default)]
    pub rising_action: String,
    /// Climax description
    #[serde(default)]
    pub climax: String,
    /// Resolution description
    #[serde(default)]
    pub resolution: String,
}

impl PhasePlan {
    /// Description text for a phase.
    pub fn description(&self, phase: Phase) -> &str {
        match phase {
            Phase::Setup => &self.setup,
            Phase::RisingAction => &self.rising_action,
            Phase::Climax => &self.climax,
            Phase::Resolution => &self.resolution,
        }
    }
}

impl Default for PhasePlan {
    fn default() -> Self {
        Self {
            setup: "Introduction of characters and world".to_string(),
            rising_action: "Building tension and conflict".to_string(),
            climax: "Peak of the story's conflict".to_string(),
            resolution: "Conclusion and character growth".to_string(),
        }
    }
}

/// Phase chosen for a turn together with its plan description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct PhaseSelection {
    /// Selected phase
    phase: Phase,
    /// Description from the phase plan
    description: String,
}

impl PhaseSelection {
    /// Pair a phase with its description.
    pub fn new(phase: Phase, description: impl Into<String>) -> Self {
        Self {
            phase,
            description: description.into(),
        }
    }
}

/// One speaker in a two-character story.
///
/// # Examples
///
/// ```
/// use kahovitz_core::CharacterProfile;
///
/// let [a, b] = CharacterProfile::defaults();
/// assert_eq!(a.name, "Char1");
/// assert_eq!(b.name, "Char2");
/// assert!(a.description.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Speaker label used in dialogue and context
    pub name: String,
    /// Personality sketch added to the persona prompt
    #[serde(default)]
    pub description: String,
}

impl CharacterProfile {
    /// Create a profile.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The two anonymous speakers used when no profiles are supplied.
    pub fn defaults() -> [CharacterProfile; 2] {
        [Self::new("Char1", ""), Self::new("Char2", "")]
    }
}

/// One generated piece of character dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// Speaker name
    pub speaker: String,
    /// Generated dialogue
    pub text: String,
    /// 1-based turn index
    pub turn: usize,
    /// Phase the turn was generated in
    pub phase: Phase,
}

/// Summary of the most recent turns, produced at interval boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Turn index the summary was produced at
    pub turn: usize,
    /// Summary text
    pub summary: String,
}

/// Narrator interjection injected after a summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narration {
    /// Turn index of the summary that triggered it
    pub turn: usize,
    /// Narration text
    pub narration: String,
}

/// Complete state of one story run.
///
/// # Examples
///
/// ```
/// use kahovitz_core::StoryState;
///
/// let state = StoryState::new("A lighthouse keeper", "Waves crash.");
/// let json = serde_json::to_value(&state).unwrap();
/// assert_eq!(json["initialContext"], "A lighthouse keeper");
/// assert_eq!(json["openingScene"], "Waves crash.");
/// assert!(json["conversations"].as_array().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    /// Refined prompt the story was generated from
    pub initial_context: String,
    /// Opening scene
    pub opening_scene: String,
    /// Dialogue turns in order
    pub conversations: Vec<Turn>,
    /// Interval summaries in order
    pub summaries: Vec<Summary>,
    /// Narrations in order
    pub narrations: Vec<Narration>,
    /// Summary of all interval summaries
    pub master_summary: String,
    /// Speakers used for the run
    #[serde(default)]
    pub characters: Vec<CharacterProfile>,
}

impl StoryState {
    /// Empty state for a run.
    pub fn new(initial_context: impl Into<String>, opening_scene: impl Into<String>) -> Self {
        Self {
            initial_context: initial_context.into(),
            opening_scene: opening_scene.into(),
            conversations: Vec::new(),
            summaries: Vec::new(),
            narrations: Vec::new(),
            master_summary: String::new(),
            characters: Vec::new(),
        }
    }
}

/// Result of refining a rough idea.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryPlan {
    /// Expanded story prompt
    pub refined_prompt: String,
    /// Description of each phase
    pub phase_plan: PhasePlan,
    /// Opening scene
    pub opening_scene: String,
}
