//! Persona system prompts and user prompt builders.

use kahovitz_core::{CharacterProfile, PhaseSelection};

/// Planner persona: refines a rough idea into a prompt and phase plan.
pub const PLANNER_SYSTEM_PROMPT: &str = r#"You are a master storyteller and narrative architect. Your task is to:
1. Refine the user's rough story idea into a detailed, engaging prompt
2. Create a structured phase plan for story development

PHASE PLAN STRUCTURE:
- Setup: Introduction of characters and world
- Rising Action: Building tension and conflict
- Climax: Peak of the story's conflict
- Resolution: Conclusion and character growth

Provide your response in this exact JSON format:
{
  "refinedPrompt": "detailed story prompt here",
  "phasePlan": {
    "setup": "description of setup phase",
    "risingAction": "description of rising action phase",
    "climax": "description of climax phase",
    "resolution": "description of resolution phase"
  }
}"#;

/// Planner persona for the opening scene.
pub const OPENING_SYSTEM_PROMPT: &str = "You are a master storyteller. Create an engaging opening scene that sets the stage for the story.
The opening should introduce the world, establish mood, and hook the reader immediately.
Keep it concise but vivid.";

/// Summarizer persona.
pub const SUMMARIZER_SYSTEM_PROMPT: &str = "You are a skilled story editor. Summarize the key events and character developments from this conversation segment.
Focus on plot progression, character interactions, and details that advance the story.
Keep the summary concise but comprehensive.";

/// Classifier persona.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a binary classifier for story narration.
Based on the summary provided, determine if narration should be added to enhance the story.
Consider: Does this segment need additional context, atmosphere, or a narrative bridge?

Respond ONLY with "True" or "False" - no other text."#;

/// Narrator persona.
pub const NARRATOR_SYSTEM_PROMPT: &str = "You are a master narrator. Create engaging narration that bridges story segments and enhances the reader's experience.
The narration should provide context, atmosphere, or narrative insight without being intrusive.
Keep it concise and flowing naturally with the story.";

/// Master summarizer persona.
pub const MASTER_SYSTEM_PROMPT: &str = "You are a master story editor. Create a comprehensive master summary of the entire story using all the segment summaries provided.
The master summary should capture the complete narrative arc, character development, and key themes.
Make it engaging and well-structured.";

/// User prompt for plan refinement.
pub fn plan_user_prompt(rough_idea: &str) -> String {
    format!("Rough story idea: {}", rough_idea)
}

/// User prompt for the opening scene.
pub fn opening_user_prompt(refined_prompt: &str) -> String {
    format!("Create an opening scene for: {}", refined_prompt)
}

/// Character persona for one turn.
///
/// # Examples
///
/// ```
/// use kahovitz_core::{CharacterProfile, Phase, PhaseSelection};
/// use kahovitz_story::prompts::character_system_prompt;
///
/// let profile = CharacterProfile::new("Mira", "a tired smuggler");
/// let phase = PhaseSelection::new(Phase::Climax, "the vault opens");
/// let prompt = character_system_prompt(&profile, &phase, 7);
/// assert!(prompt.starts_with("You are Mira, a character in an ongoing story."));
/// assert!(prompt.contains("Current phase: climax (the vault opens)"));
/// assert!(prompt.contains("Turn number: 7"));
/// assert!(prompt.contains("a tired smuggler"));
/// ```
pub fn character_system_prompt(
    profile: &CharacterProfile,
    phase: &PhaseSelection,
    turn: usize,
) -> String {
    let mut prompt = format!("You are {}, a character in an ongoing story.\n", profile.name);

    if !profile.description.trim().is_empty() {
        prompt.push_str(&format!("Your personality: {}\n", profile.description.trim()));
    }

    if phase.description().trim().is_empty() {
        prompt.push_str(&format!("Current phase: {}\n", phase.phase()));
    } else {
        prompt.push_str(&format!(
            "Current phase: {} ({})\n",
            phase.phase(),
            phase.description().trim()
        ));
    }

    prompt.push_str(&format!(
        "Turn number: {}\n\n\
         Respond naturally to the conversation context. Stay in character and keep your personality and the story's tone consistent.\n\
         Keep your response engaging and move the story forward.",
        turn
    ));

    prompt
}

/// User prompt for one character turn.
pub fn character_user_prompt(context: &str, speaker: &str) -> String {
    format!("Story context: {}\n\nWhat does {} say next?", context, speaker)
}

/// User prompt for an interval summary.
pub fn summary_user_prompt(segment: &str) -> String {
    format!("Summarize this conversation segment:\n{}", segment)
}

/// User prompt for the narration classifier.
pub fn classifier_user_prompt(summary: &str) -> String {
    format!(
        "Summary: {}\n\nShould narration be added? (True/False)",
        summary
    )
}

/// User prompt for a narration.
pub fn narration_user_prompt(context: &str, summary: &str) -> String {
    format!(
        "Story context: {}\nRecent summary: {}\n\nGenerate engaging narration.",
        context, summary
    )
}

/// User prompt for the master summary.
pub fn master_user_prompt(summaries: &[String]) -> String {
    format!(
        "Create a master summary from these segment summaries:\n{}",
        summaries.join("\n\n")
    )
}
