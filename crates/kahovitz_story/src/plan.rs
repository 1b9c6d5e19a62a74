//! Story planning: rough idea to refined prompt, phase plan and opening scene.

use crate::prompts::{
    OPENING_SYSTEM_PROMPT, PLANNER_SYSTEM_PROMPT, opening_user_prompt, plan_user_prompt,
};
use crate::{ContentGenerator, PersonaRole, extract_json, parse_json};
use kahovitz_core::{PhasePlan, StoryPlan};
use kahovitz_error::{KahovitzResult, StoryError, StoryErrorKind};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const REFINED_LABEL: &str = "\"refinedPrompt\":";
const PHASE_PLAN_LABEL: &str = "\"phasePlan\":";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    refined_prompt: String,
    #[serde(default)]
    phase_plan: PhasePlan,
}

impl PlanPayload {
    fn usable(self) -> Option<(String, PhasePlan)> {
        let refined = self.refined_prompt.trim();
        if refined.is_empty() {
            None
        } else {
            Some((refined.to_string(), self.phase_plan))
        }
    }
}

/// Parse the planner's response into a refined prompt and phase plan.
///
/// Tries a strict decode of the whole response, then the first JSON object
/// found in it, then a labeled-field scan for `"refinedPrompt":` paired with
/// the default phase plan. Never fails: with no label at all the whole
/// response becomes the refined prompt.
///
/// # Examples
///
/// ```
/// use kahovitz_core::PhasePlan;
/// use kahovitz_story::parse_plan_response;
///
/// let (prompt, plan) = parse_plan_response(
///     r#"{"refinedPrompt": "A heist on the moon", "phasePlan": {"setup": "crew assembles"}}"#,
/// );
/// assert_eq!(prompt, "A heist on the moon");
/// assert_eq!(plan.setup, "crew assembles");
///
/// let (prompt, plan) = parse_plan_response("no json here");
/// assert_eq!(prompt, "no json here");
/// assert_eq!(plan, PhasePlan::default());
/// ```
pub fn parse_plan_response(response: &str) -> (String, PhasePlan) {
    if let Some(parsed) = serde_json::from_str::<PlanPayload>(response.trim())
        .ok()
        .and_then(PlanPayload::usable)
    {
        return parsed;
    }

    if let Some(parsed) = extract_json(response)
        .and_then(|json| parse_json::<PlanPayload>(&json))
        .ok()
        .and_then(PlanPayload::usable)
    {
        debug!("Plan recovered from embedded JSON");
        return parsed;
    }

    warn!(
        response_length = response.len(),
        "Planner response is not JSON, using labeled-field fallback with default phase plan"
    );
    (fallback_refined_prompt(response), PhasePlan::default())
}

fn fallback_refined_prompt(response: &str) -> String {
    let Some(start) = response.find(REFINED_LABEL) else {
        return response.to_string();
    };

    let rest = &response[start + REFINED_LABEL.len()..];
    let field = rest
        .find(PHASE_PLAN_LABEL)
        .map(|end| &rest[..end])
        .unwrap_or(rest);

    let cleaned = field.replace('"', "");
    let cleaned = cleaned.trim().trim_end_matches(',').trim();

    if cleaned.is_empty() {
        response.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Produces story plans with the planner persona.
#[derive(Debug, Clone)]
pub struct StoryPlanner {
    generator: Arc<ContentGenerator>,
}

impl StoryPlanner {
    /// Planner over a content generator.
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Refine a rough idea into a prompt and phase plan.
    ///
    /// # Errors
    ///
    /// Returns error if the planner call fails. Unparseable responses are
    /// recovered, not reported.
    #[instrument(skip(self, rough_idea), fields(idea_len = rough_idea.len()))]
    pub async fn refine(&self, rough_idea: &str) -> KahovitzResult<(String, PhasePlan)> {
        let response = self
            .generator
            .generate(
                PersonaRole::Planner,
                PLANNER_SYSTEM_PROMPT,
                &plan_user_prompt(rough_idea),
            )
            .await?;

        Ok(parse_plan_response(&response))
    }

    /// Write the opening scene for a refined prompt.
    ///
    /// # Errors
    ///
    /// Returns error if the planner call fails.
    #[instrument(skip(self, refined_prompt))]
    pub async fn opening_scene(&self, refined_prompt: &str) -> KahovitzResult<String> {
        self.generator
            .generate(
                PersonaRole::Planner,
                OPENING_SYSTEM_PROMPT,
                &opening_user_prompt(refined_prompt),
            )
            .await
    }

    /// Refine a rough idea and write its opening scene.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank idea, or any generation error.
    #[instrument(skip(self, rough_idea))]
    pub async fn plan(&self, rough_idea: &str) -> KahovitzResult<StoryPlan> {
        if rough_idea.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::MissingField("roughIdea".to_string())).into());
        }

        info!("Planning story");
        let (refined_prompt, phase_plan) = self.refine(rough_idea).await?;
        let opening_scene = self.opening_scene(&refined_prompt).await?;

        Ok(StoryPlan {
            refined_prompt,
            phase_plan,
            opening_scene,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_keeps_phase_plan() {
        let response = r#"{
  "refinedPrompt": "Two rival chefs share a kitchen",
  "phasePlan": {
    "setup": "The kitchen opens",
    "risingAction": "A critic is coming",
    "climax": "The dinner service",
    "resolution": "A shared recipe"
  }
}"#;
        let (prompt, plan) = parse_plan_response(response);
        assert_eq!(prompt, "Two rival chefs share a kitchen");
        assert_eq!(plan.rising_action, "A critic is coming");
        assert_eq!(plan.resolution, "A shared recipe");
    }

    #[test]
    fn fenced_json_is_extracted() {
        let response = "Sure!\n```json\n{\"refinedPrompt\": \"Desert caravan\", \"phasePlan\": {\"climax\": \"sandstorm\"}}\n```";
        let (prompt, plan) = parse_plan_response(response);
        assert_eq!(prompt, "Desert caravan");
        assert_eq!(plan.climax, "sandstorm");
    }

    #[test]
    fn labeled_fallback_strips_quotes_and_comma() {
        let response = r#"Here you go: "refinedPrompt": "A lonely robot, a lost cat", "phasePlan": { broken"#;
        let (prompt, plan) = parse_plan_response(response);
        assert_eq!(prompt, "A lonely robot, a lost cat");
        assert_eq!(plan, PhasePlan::default());
    }

    #[test]
    fn label_without_phase_plan_runs_to_end() {
        let response = r#""refinedPrompt": "Ghost ship""#;
        let (prompt, _) = parse_plan_response(response);
        assert_eq!(prompt, "Ghost ship");
    }

    #[test]
    fn empty_label_value_falls_back_to_whole_response() {
        let response = r#""refinedPrompt": "", "phasePlan":"#;
        let (prompt, plan) = parse_plan_response(response);
        assert_eq!(prompt, response);
        assert_eq!(plan, PhasePlan::default());
    }

    #[test]
    fn empty_refined_prompt_in_json_is_not_accepted() {
        let response = r#"{"refinedPrompt": "   ", "phasePlan": {"setup": "x"}}"#;
        let (prompt, plan) = parse_plan_response(response);
        assert_eq!(prompt, response);
        assert_eq!(plan, PhasePlan::default());
    }
}
