//! Story planning and generation command handlers.

use super::StoryArgs;
use anyhow::Context;
use kahovitz::{
    ContentGenerator, GroqClassifier, KahovitzConfig, ProgressSink, ProgressUpdate, RateLimiter,
    StoryOptions, StoryOrchestrator, StoryPlan, StoryPlanner,
};
use std::sync::Arc;
use tracing::info;

/// Progress sink that logs each report.
struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, update: ProgressUpdate) {
        info!(
            status = %update.status(),
            progress = *update.progress(),
            "{}",
            update.message()
        );
    }
}

fn generator(config: &KahovitzConfig) -> Arc<ContentGenerator> {
    let limiter = config.get_tier("groq", None).map(RateLimiter::new);
    Arc::new(ContentGenerator::from_env(config.models.clone(), limiter))
}

/// Handle the `plan` command
pub async fn plan_story(config: KahovitzConfig, idea: &str, json: bool) -> anyhow::Result<()> {
    let planner = StoryPlanner::new(generator(&config));
    let plan = planner.plan(idea).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("Refined prompt:\n{}\n", plan.refined_prompt);
        println!("Setup: {}", plan.phase_plan.setup);
        println!("Rising action: {}", plan.phase_plan.rising_action);
        println!("Climax: {}", plan.phase_plan.climax);
        println!("Resolution: {}\n", plan.phase_plan.resolution);
        println!("Opening scene:\n{}", plan.opening_scene);
    }

    Ok(())
}

/// Handle the `story` command
pub async fn write_story(config: KahovitzConfig, args: StoryArgs) -> anyhow::Result<()> {
    let generator = generator(&config);

    let plan = match (&args.plan, &args.idea) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read plan {}", path.display()))?;
            serde_json::from_str::<StoryPlan>(&raw)
                .with_context(|| format!("Failed to parse plan {}", path.display()))?
        }
        (None, Some(idea)) => StoryPlanner::new(generator.clone()).plan(idea).await?,
        (None, None) => anyhow::bail!("Either an idea or --plan is required"),
    };

    let options = StoryOptions::new(plan.refined_prompt, plan.opening_scene, plan.phase_plan)
        .with_turns(
            args.turns.unwrap_or(config.story.total_utterances),
            args.interval.unwrap_or(config.story.summary_interval),
        );

    let classifier = Arc::new(GroqClassifier::new(generator.clone()));
    let orchestrator = StoryOrchestrator::new(generator, classifier);
    let outcome = orchestrator.run(&options, &LogProgress).await?;

    if let Some(path) = &args.data {
        std::fs::write(path, serde_json::to_string_pretty(&outcome.data)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &outcome.markdown)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Story written");
        }
        None => println!("{}", outcome.markdown),
    }

    Ok(())
}
