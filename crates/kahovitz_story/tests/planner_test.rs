//! Planner tests against mock drivers.

mod common;

use common::{FixedDriver, MockDriver};
use kahovitz_rate_limit::ModelSettings;
use kahovitz_story::{ContentGenerator, PersonaRole, StoryPlanner};
use std::sync::Arc;

#[tokio::test]
async fn plan_refines_then_writes_opening() {
    let planner_driver = Arc::new(FixedDriver(
        r#"Here you go:
```json
{"refinedPrompt": "A lighthouse keeper hides a smuggler", "phasePlan": {"setup": "Storm night", "climax": "The raid"}}
```"#
            .to_string(),
    ));
    let generator = ContentGenerator::new(ModelSettings::default())
        .with_driver(PersonaRole::Planner, planner_driver);
    let planner = StoryPlanner::new(Arc::new(generator));

    let plan = planner
        .plan("lighthouse smuggler")
        .await
        .expect("plan succeeds");

    assert_eq!(plan.refined_prompt, "A lighthouse keeper hides a smuggler");
    assert_eq!(plan.phase_plan.setup, "Storm night");
    assert_eq!(plan.phase_plan.climax, "The raid");
    assert!(plan.phase_plan.resolution.is_empty());
    assert!(plan.opening_scene.contains("refinedPrompt"));
}

#[tokio::test]
async fn opening_scene_uses_refined_prompt() {
    let driver = Arc::new(MockDriver::new("scene"));
    let generator = ContentGenerator::new(ModelSettings::default())
        .with_driver(PersonaRole::Planner, driver.clone());
    let planner = StoryPlanner::new(Arc::new(generator));

    let plan = planner.plan("a rough idea").await.expect("plan succeeds");

    assert_eq!(driver.calls(), 2);
    let prompts = driver.user_prompts();
    assert_eq!(prompts[0], "Rough story idea: a rough idea");
    assert_eq!(
        prompts[1],
        format!("Create an opening scene for: {}", plan.refined_prompt)
    );
    assert_eq!(plan.opening_scene, "scene 2");
}

#[tokio::test]
async fn blank_idea_is_rejected_without_calls() {
    let driver = Arc::new(MockDriver::new("never"));
    let generator = ContentGenerator::new(ModelSettings::default())
        .with_driver(PersonaRole::Planner, driver.clone());
    let planner = StoryPlanner::new(Arc::new(generator));

    let err = planner.plan("  ").await.expect_err("blank idea");

    assert!(err.is_validation());
    assert_eq!(driver.calls(), 0);
}

#[tokio::test]
async fn missing_planner_driver_reports_credential() {
    let planner = StoryPlanner::new(Arc::new(ContentGenerator::new(ModelSettings::default())));

    let err = planner.plan("idea").await.expect_err("no driver");

    assert!(err.to_string().contains("GROQ_3"));
}
