//! Story loop tests against mock drivers.

mod common;

use common::{FixedDriver, MockDriver, RecordingSink, ScriptedClassifier};
use kahovitz_core::{CharacterProfile, Phase, PhasePlan};
use kahovitz_interface::{NullProgress, SessionStatus};
use kahovitz_rate_limit::ModelSettings;
use kahovitz_story::{
    ContentGenerator, GroqClassifier, PersonaRole, StoryOptions, StoryOrchestrator,
};
use std::sync::Arc;

struct Harness {
    char_a: Arc<MockDriver>,
    char_b: Arc<MockDriver>,
    summarizer: Arc<MockDriver>,
    narrator: Arc<MockDriver>,
    master: Arc<MockDriver>,
}

impl Harness {
    fn new() -> Self {
        Self {
            char_a: Arc::new(MockDriver::new("line-a")),
            char_b: Arc::new(MockDriver::new("line-b")),
            summarizer: Arc::new(MockDriver::new("summary")),
            narrator: Arc::new(MockDriver::new("narration")),
            master: Arc::new(MockDriver::new("master")),
        }
    }

    /// Replace the driver behind one persona.
    fn with(mut self, role: PersonaRole, driver: MockDriver) -> Self {
        let driver = Arc::new(driver);
        match role {
            PersonaRole::CharacterA => self.char_a = driver,
            PersonaRole::CharacterB => self.char_b = driver,
            PersonaRole::Summarizer => self.summarizer = driver,
            PersonaRole::Narrator => self.narrator = driver,
            PersonaRole::MasterSummarizer => self.master = driver,
            other => panic!("no harness driver for {:?}", other),
        }
        self
    }

    fn dialogue_calls(&self) -> usize {
        self.char_a.calls() + self.char_b.calls()
    }

    fn generator(&self) -> Arc<ContentGenerator> {
        Arc::new(
            ContentGenerator::new(ModelSettings::default())
                .with_driver(PersonaRole::CharacterA, self.char_a.clone())
                .with_driver(PersonaRole::CharacterB, self.char_b.clone())
                .with_driver(PersonaRole::Summarizer, self.summarizer.clone())
                .with_driver(PersonaRole::Narrator, self.narrator.clone())
                .with_driver(PersonaRole::MasterSummarizer, self.master.clone()),
        )
    }
}

fn options(total: usize, interval: usize) -> StoryOptions {
    StoryOptions::new(
        "A heist on a moon base",
        "The airlock hisses open.",
        PhasePlan::default(),
    )
    .with_turns(total, interval)
}

#[tokio::test]
async fn eight_turns_with_interval_four() {
    let harness = Harness::new();
    let classifier = Arc::new(ScriptedClassifier::new(&[true, false]));
    let orchestrator = StoryOrchestrator::new(harness.generator(), classifier.clone());

    let outcome = orchestrator
        .run(&options(8, 4), &NullProgress)
        .await
        .expect("story should complete");
    let story = &outcome.data;

    assert_eq!(story.conversations.len(), 8);
    for (i, turn) in story.conversations.iter().enumerate() {
        assert_eq!(turn.turn, i + 1);
        let expected = if i % 2 == 0 { "Char1" } else { "Char2" };
        assert_eq!(turn.speaker, expected);
    }
    assert_eq!(story.conversations[0].text, "line-a 1");
    assert_eq!(story.conversations[1].text, "line-b 1");

    let summary_turns: Vec<usize> = story.summaries.iter().map(|s| s.turn).collect();
    assert_eq!(summary_turns, vec![4, 8]);
    assert_eq!(classifier.seen(), vec!["summary 1", "summary 2"]);

    assert_eq!(story.narrations.len(), 1);
    assert_eq!(story.narrations[0].turn, 4);
    assert_eq!(story.narrations[0].narration, "narration 1");

    assert_eq!(story.master_summary, "master 1");
    assert_eq!(story.initial_context, "A heist on a moon base");
    assert_eq!(story.characters, CharacterProfile::defaults().to_vec());

    assert_eq!(harness.char_a.calls(), 4);
    assert_eq!(harness.char_b.calls(), 4);
    assert_eq!(harness.summarizer.calls(), 2);
    assert_eq!(harness.narrator.calls(), 1);
    assert_eq!(harness.master.calls(), 1);

    assert!(outcome.markdown.starts_with("# Story Generated by Kahovitz"));
    assert!(outcome.markdown.contains("### Turn 8: Char2\nline-b 4"));
    assert!(outcome.markdown.contains("### Narration 1\nnarration 1"));
}

#[tokio::test]
async fn phases_follow_the_turn_position() {
    let harness = Harness::new();
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[])),
    );

    let outcome = orchestrator
        .run(&options(8, 4), &NullProgress)
        .await
        .expect("story should complete");

    let phases: Vec<Phase> = outcome.data.conversations.iter().map(|t| t.phase).collect();
    assert_eq!(
        phases,
        vec![
            Phase::Setup,
            Phase::Setup,
            Phase::RisingAction,
            Phase::RisingAction,
            Phase::Climax,
            Phase::Climax,
            Phase::Resolution,
            Phase::Resolution,
        ]
    );

    let systems = harness.char_a.system_prompts();
    assert!(systems[0].contains("Current phase: setup (Introduction of characters and world)"));
    assert!(systems[0].contains("Turn number: 1"));
}

#[tokio::test]
async fn context_accumulates_dialogue_and_narration() {
    let harness = Harness::new();
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[true])),
    );

    orchestrator
        .run(&options(6, 2), &NullProgress)
        .await
        .expect("story should complete");

    let prompts = harness.char_a.user_prompts();
    assert_eq!(
        prompts[0],
        "Story context: The airlock hisses open.\n\nWhat does Char1 say next?"
    );
    assert!(prompts[1].contains("\nChar1: line-a 1\nChar2: line-b 1\nNarrator: narration 1"));

    let summaries = harness.summarizer.user_prompts();
    assert_eq!(
        summaries[0],
        "Summarize this conversation segment:\nChar1: line-a 1\nChar2: line-b 1"
    );
    assert_eq!(
        summaries[1],
        "Summarize this conversation segment:\nChar1: line-a 2\nChar2: line-b 2"
    );

    let master = harness.master.user_prompts();
    assert_eq!(master[0], "summary 1\n\nsummary 2\n\nsummary 3");
}

#[tokio::test]
async fn trailing_turns_without_summary() {
    let harness = Harness::new();
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[])),
    );

    let outcome = orchestrator
        .run(&options(5, 2), &NullProgress)
        .await
        .expect("story should complete");

    assert_eq!(outcome.data.conversations.len(), 5);
    let summary_turns: Vec<usize> = outcome.data.summaries.iter().map(|s| s.turn).collect();
    assert_eq!(summary_turns, vec![2, 4]);
    assert!(outcome.data.narrations.is_empty());
}

#[tokio::test]
async fn custom_characters_speak_in_order() {
    let harness = Harness::new();
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[])),
    );
    let characters = [
        CharacterProfile::new("Mira", "a tired smuggler"),
        CharacterProfile::new("Oren", "an anxious engineer"),
    ];

    let outcome = orchestrator
        .run(&options(3, 3).with_characters(characters), &NullProgress)
        .await
        .expect("story should complete");

    let speakers: Vec<&str> = outcome
        .data
        .conversations
        .iter()
        .map(|t| t.speaker.as_str())
        .collect();
    assert_eq!(speakers, vec!["Mira", "Oren", "Mira"]);
    assert!(harness.char_b.system_prompts()[0].contains("Your personality: an anxious engineer"));
}

#[tokio::test]
async fn progress_is_monotonic_and_completes() {
    let harness = Harness::new();
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[true, true])),
    );
    let sink = RecordingSink::default();

    orchestrator
        .run(&options(8, 4), &sink)
        .await
        .expect("story should complete");

    let updates = sink.updates();
    assert_eq!(*updates[0].status(), SessionStatus::Starting);
    assert_eq!(*updates[0].progress(), 0);

    let mut last = 0;
    for update in &updates {
        assert!(*update.progress() >= last, "progress went backwards");
        last = *update.progress();
    }

    let generating: Vec<u8> = updates
        .iter()
        .filter(|u| *u.status() == SessionStatus::Generating)
        .map(|u| *u.progress())
        .collect();
    assert_eq!(generating, vec![12, 25, 37, 50, 62, 75, 87, 100]);

    let last = updates.last().expect("at least one update");
    assert_eq!(*last.status(), SessionStatus::Complete);
    assert_eq!(*last.progress(), 100);
    assert_eq!(last.story().as_ref().map(|s| s.conversations.len()), Some(8));
    assert!(last.markdown().is_some());
    assert_eq!(
        updates.iter().filter(|u| u.status().is_terminal()).count(),
        1
    );
}

#[tokio::test]
async fn dialogue_failure_aborts_the_run() {
    let harness = Harness::new().with(
        PersonaRole::CharacterA,
        MockDriver::failing_on("line-a", 2),
    );
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[])),
    );
    let sink = RecordingSink::default();

    let err = orchestrator
        .run(&options(8, 4), &sink)
        .await
        .expect_err("second Char1 turn fails");

    assert!(err.to_string().contains("upstream exploded"));
    assert_eq!(harness.master.calls(), 0);

    let last = sink.updates().pop().expect("failure is reported");
    assert_eq!(*last.status(), SessionStatus::Failed);
    assert_eq!(*last.progress(), 25);
    assert!(last.error().as_deref().unwrap_or_default().contains("upstream exploded"));
}

fn assert_failed_at(sink: &RecordingSink, progress: u8) {
    let last = sink.updates().pop().expect("failure is reported");
    assert_eq!(*last.status(), SessionStatus::Failed);
    assert_eq!(*last.progress(), progress);
    let error = last.error().clone().unwrap_or_default();
    assert_eq!(error, "API error 500: upstream exploded");
}

#[tokio::test]
async fn summary_failure_aborts_the_run() {
    let harness = Harness::new().with(
        PersonaRole::Summarizer,
        MockDriver::failing_on("summary", 1),
    );
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[])),
    );
    let sink = RecordingSink::default();

    orchestrator
        .run(&options(8, 4), &sink)
        .await
        .expect_err("first summary fails");

    assert_eq!(harness.dialogue_calls(), 4, "no turn after the failed summary");
    assert_eq!(harness.narrator.calls(), 0);
    assert_eq!(harness.master.calls(), 0);
    assert_failed_at(&sink, 50);
}

#[tokio::test]
async fn narration_failure_aborts_the_run() {
    let harness = Harness::new().with(
        PersonaRole::Narrator,
        MockDriver::failing_on("narration", 1),
    );
    let classifier = Arc::new(ScriptedClassifier::new(&[true]));
    let orchestrator = StoryOrchestrator::new(harness.generator(), classifier.clone());
    let sink = RecordingSink::default();

    orchestrator
        .run(&options(8, 4), &sink)
        .await
        .expect_err("first narration fails");

    assert_eq!(classifier.seen(), vec!["summary 1".to_string()]);
    assert_eq!(harness.narrator.calls(), 1);
    assert_eq!(harness.dialogue_calls(), 4, "no turn after the failed narration");
    assert_eq!(harness.summarizer.calls(), 1);
    assert_eq!(harness.master.calls(), 0);
    assert_failed_at(&sink, 50);
}

#[tokio::test]
async fn master_summary_failure_aborts_the_run() {
    let harness = Harness::new().with(
        PersonaRole::MasterSummarizer,
        MockDriver::failing_on("master", 1),
    );
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(ScriptedClassifier::new(&[])),
    );
    let sink = RecordingSink::default();

    orchestrator
        .run(&options(8, 4), &sink)
        .await
        .expect_err("master summary fails");

    assert_eq!(harness.dialogue_calls(), 8);
    assert_eq!(harness.summarizer.calls(), 2);
    assert_eq!(harness.master.calls(), 1);
    assert!(harness.master.user_prompts()[0].ends_with("summary 1\n\nsummary 2"));

    let updates = sink.updates();
    let before_failure = &updates[updates.len() - 2];
    assert_eq!(*before_failure.status(), SessionStatus::Summarizing);
    assert_eq!(*before_failure.progress(), 100);
    assert!(updates.iter().all(|u| u.story().is_none()));
    assert_failed_at(&sink, 100);
}

#[tokio::test]
async fn classifier_failure_skips_narration() {
    let harness = Harness::new();
    let classifier_generator = Arc::new(
        ContentGenerator::new(ModelSettings::default()).with_driver(
            PersonaRole::Classifier,
            Arc::new(MockDriver::failing_on("verdict", 1)),
        ),
    );
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(GroqClassifier::new(classifier_generator)),
    );

    let outcome = orchestrator
        .run(&options(4, 2), &NullProgress)
        .await
        .expect("classifier errors do not abort the run");

    assert_eq!(outcome.data.summaries.len(), 2);
    assert!(outcome.data.narrations.is_empty());
    assert_eq!(harness.narrator.calls(), 0);
}

#[tokio::test]
async fn classifier_reply_is_sanitized() {
    let harness = Harness::new();
    let classifier_generator = Arc::new(
        ContentGenerator::new(ModelSettings::default()).with_driver(
            PersonaRole::Classifier,
            Arc::new(FixedDriver("  TRUE.\n".to_string())),
        ),
    );
    let orchestrator = StoryOrchestrator::new(
        harness.generator(),
        Arc::new(GroqClassifier::new(classifier_generator)),
    );

    let outcome = orchestrator
        .run(&options(4, 2), &NullProgress)
        .await
        .expect("story should complete");

    assert_eq!(outcome.data.narrations.len(), 2);
}
