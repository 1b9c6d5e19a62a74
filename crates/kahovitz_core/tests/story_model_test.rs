use kahovitz_core::{
    CharacterProfile, Narration, Phase, PhasePlan, StoryState, Summary, Turn,
};
use std::str::FromStr;

#[test]
fn phase_names_are_camel_case() {
    assert_eq!(Phase::Setup.to_string(), "setup");
    assert_eq!(Phase::Resolution.as_ref(), "resolution");
    assert_eq!(Phase::from_str("risingAction").unwrap(), Phase::RisingAction);
}

#[test]
fn default_phase_plan_descriptions() {
    let plan = PhasePlan::default();
    assert_eq!(plan.description(Phase::Setup), "Introduction of characters and world");
    assert_eq!(plan.description(Phase::Climax), "Peak of the story's conflict");
}

#[test]
fn phase_plan_accepts_partial_json() {
    let plan: PhasePlan = serde_json::from_str(r#"{"setup":"meet","climax":"fight"}"#).unwrap();
    assert_eq!(plan.setup, "meet");
    assert_eq!(plan.rising_action, "");
    assert_eq!(plan.climax, "fight");
}

#[test]
fn story_state_uses_wire_field_names() {
    let mut state = StoryState::new("idea", "scene");
    state.conversations.push(Turn {
        speaker: "Char1".to_string(),
        text: "Hello".to_string(),
        turn: 1,
        phase: Phase::RisingAction,
    });
    state.summaries.push(Summary {
        turn: 4,
        summary: "greetings".to_string(),
    });
    state.narrations.push(Narration {
        turn: 4,
        narration: "Night fell.".to_string(),
    });
    state.master_summary = "all of it".to_string();
    state.characters = CharacterProfile::defaults().to_vec();

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["conversations"][0]["turn"], 1);
    assert_eq!(json["conversations"][0]["phase"], "risingAction");
    assert_eq!(json["summaries"][0]["summary"], "greetings");
    assert_eq!(json["narrations"][0]["narration"], "Night fell.");
    assert_eq!(json["masterSummary"], "all of it");

    let back: StoryState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
}
