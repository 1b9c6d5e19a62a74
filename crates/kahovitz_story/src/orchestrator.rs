//! The story loop.

use crate::prompts::{
    MASTER_SYSTEM_PROMPT, NARRATOR_SYSTEM_PROMPT, SUMMARIZER_SYSTEM_PROMPT,
    character_system_prompt, character_user_prompt, master_user_prompt, narration_user_prompt,
    summary_user_prompt,
};
use crate::{ContentGenerator, PersonaRole, render_markdown, select_phase};
use kahovitz_core::{CharacterProfile, Narration, PhasePlan, StoryState, Summary, Turn};
use kahovitz_error::{KahovitzResult, StoryError, StoryErrorKind};
use kahovitz_interface::{NarrationClassifier, ProgressSink, ProgressUpdate, SessionStatus};
use kahovitz_rate_limit::StorySettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Story generation request as received from a client.
///
/// Every field is optional on the wire so that missing or out-of-range values
/// are reported by [`StoryRequest::validate`] rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryRequest {
    /// Refined story prompt
    pub refined_prompt: Option<String>,
    /// Opening scene
    pub opening_scene: Option<String>,
    /// Phase descriptions
    pub phase_plan: Option<PhasePlan>,
    /// Two character profiles
    pub characters: Option<Vec<CharacterProfile>>,
    /// Number of turns
    pub total_utterances: Option<i64>,
    /// Turns between summaries
    pub summary_interval: Option<i64>,
    /// Run in the background and stream progress
    pub stream: bool,
}

impl StoryRequest {
    /// Validate the request and fill in defaults.
    ///
    /// Supplied characters must number exactly two; they replace the default
    /// `Char1`/`Char2` speakers only when `character_profiles` is enabled.
    ///
    /// # Errors
    ///
    /// Returns a story validation error naming the offending field.
    pub fn validate(&self, settings: &StorySettings) -> KahovitzResult<StoryOptions> {
        let missing = || {
            StoryError::new(StoryErrorKind::MissingField(
                "refinedPrompt, openingScene, and phasePlan".to_string(),
            ))
        };

        let refined_prompt = non_blank(self.refined_prompt.as_deref()).ok_or_else(missing)?;
        let opening_scene = non_blank(self.opening_scene.as_deref()).ok_or_else(missing)?;
        let phase_plan = self.phase_plan.clone().ok_or_else(missing)?;

        let total_utterances = positive(
            self.total_utterances,
            settings.total_utterances,
            "totalUtterances",
        )?;
        let summary_interval = positive(
            self.summary_interval,
            settings.summary_interval,
            "summaryInterval",
        )?;

        let characters = match &self.characters {
            None => CharacterProfile::defaults(),
            Some(list) => {
                let pair: [CharacterProfile; 2] = list
                    .clone()
                    .try_into()
                    .map_err(|_| StoryError::new(StoryErrorKind::CharacterCount(list.len())))?;
                if pair.iter().any(|c| c.name.trim().is_empty()) {
                    return Err(StoryError::new(StoryErrorKind::InvalidParameter(
                        "character names must not be empty".to_string(),
                    ))
                    .into());
                }
                if settings.character_profiles {
                    pair
                } else {
                    debug!("Character profiles disabled, using default speakers");
                    CharacterProfile::defaults()
                }
            }
        };

        Ok(StoryOptions {
            refined_prompt,
            opening_scene,
            phase_plan,
            characters,
            total_utterances,
            summary_interval,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn positive(value: Option<i64>, default: usize, field: &str) -> KahovitzResult<usize> {
    match value {
        None => Ok(default),
        Some(v) if v >= 1 => usize::try_from(v).map_err(|_| {
            StoryError::new(StoryErrorKind::InvalidParameter(format!("{} is too large", field)))
                .into()
        }),
        Some(v) => Err(StoryError::new(StoryErrorKind::InvalidParameter(format!(
            "{} must be at least 1, got {}",
            field, v
        )))
        .into()),
    }
}

/// Validated parameters of one story run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryOptions {
    /// Refined story prompt
    pub refined_prompt: String,
    /// Opening scene, the initial context
    pub opening_scene: String,
    /// Phase descriptions
    pub phase_plan: PhasePlan,
    /// Speakers; index 0 speaks first
    pub characters: [CharacterProfile; 2],
    /// Number of turns, at least 1
    pub total_utterances: usize,
    /// Turns between summaries, at least 1
    pub summary_interval: usize,
}

impl StoryOptions {
    /// Options with default speakers, 20 turns and a summary every 4.
    pub fn new(
        refined_prompt: impl Into<String>,
        opening_scene: impl Into<String>,
        phase_plan: PhasePlan,
    ) -> Self {
        let defaults = StorySettings::default();
        Self {
            refined_prompt: refined_prompt.into(),
            opening_scene: opening_scene.into(),
            phase_plan,
            characters: CharacterProfile::defaults(),
            total_utterances: defaults.total_utterances,
            summary_interval: defaults.summary_interval,
        }
    }

    /// Set turn count and summary interval (each at least 1).
    pub fn with_turns(mut self, total_utterances: usize, summary_interval: usize) -> Self {
        self.total_utterances = total_utterances.max(1);
        self.summary_interval = summary_interval.max(1);
        self
    }

    /// Replace the speakers.
    pub fn with_characters(mut self, characters: [CharacterProfile; 2]) -> Self {
        self.characters = characters;
        self
    }
}

/// A finished story and its Markdown rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryOutcome {
    /// Story data
    pub data: StoryState,
    /// Markdown rendering
    pub markdown: String,
}

/// Progress reporter that never lets the percentage go backwards.
struct Tracker<'a> {
    sink: &'a dyn ProgressSink,
    last: u8,
}

impl Tracker<'_> {
    fn report(&mut self, status: SessionStatus, progress: u8, message: String) {
        self.last = self.last.max(progress.min(100));
        self.sink
            .report(ProgressUpdate::new(status, self.last, message));
    }
}

fn percent(turn: usize, total: usize) -> u8 {
    (turn.saturating_mul(100) / total.max(1)).min(100) as u8
}

/// Drives dialogue, summaries, narration and the master summary.
#[derive(Clone)]
pub struct StoryOrchestrator {
    generator: Arc<ContentGenerator>,
    classifier: Arc<dyn NarrationClassifier>,
}

impl std::fmt::Debug for StoryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryOrchestrator")
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl StoryOrchestrator {
    /// Orchestrator over a generator and a narration classifier.
    pub fn new(generator: Arc<ContentGenerator>, classifier: Arc<dyn NarrationClassifier>) -> Self {
        Self {
            generator,
            classifier,
        }
    }

    /// Run a story to completion.
    ///
    /// Reports progress after each turn, at each summary, before the master
    /// summary, and a terminal `complete` or `failed` report at the end.
    ///
    /// # Errors
    ///
    /// Any dialogue, summary, narration or master-summary failure aborts the
    /// run. Classifier failures do not.
    #[instrument(
        skip_all,
        fields(total = options.total_utterances, interval = options.summary_interval)
    )]
    pub async fn run(
        &self,
        options: &StoryOptions,
        progress: &dyn ProgressSink,
    ) -> KahovitzResult<StoryOutcome> {
        let mut tracker = Tracker {
            sink: progress,
            last: 0,
        };
        tracker.report(
            SessionStatus::Starting,
            0,
            "Starting story generation".to_string(),
        );

        match self.execute(options, &mut tracker).await {
            Ok(outcome) => {
                info!(
                    turns = outcome.data.conversations.len(),
                    summaries = outcome.data.summaries.len(),
                    narrations = outcome.data.narrations.len(),
                    "Story complete"
                );
                progress.report(ProgressUpdate::complete(
                    outcome.data.clone(),
                    outcome.markdown.clone(),
                ));
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, "Story generation failed");
                progress.report(ProgressUpdate::failed(tracker.last, e.message()));
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        options: &StoryOptions,
        tracker: &mut Tracker<'_>,
    ) -> KahovitzResult<StoryOutcome> {
        let total = options.total_utterances.max(1);
        let interval = options.summary_interval.max(1);

        let mut story = StoryState::new(&options.refined_prompt, &options.opening_scene);
        story.characters = options.characters.to_vec();

        let mut context = options.opening_scene.clone();
        let mut last_speaker: Option<usize> = None;

        for turn in 1..=total {
            let phase = select_phase(&options.phase_plan, total, turn);
            let speaker = match last_speaker {
                Some(0) => 1,
                _ => 0,
            };
            let profile = &options.characters[speaker];

            let text = self
                .generator
                .generate(
                    PersonaRole::character(speaker),
                    &character_system_prompt(profile, &phase, turn),
                    &character_user_prompt(&context, &profile.name),
                )
                .await?;

            debug!(turn, speaker = %profile.name, phase = %phase.phase(), "Turn generated");
            context.push_str(&format!("\n{}: {}", profile.name, text));
            story.conversations.push(Turn {
                speaker: profile.name.clone(),
                text,
                turn,
                phase: *phase.phase(),
            });
            last_speaker = Some(speaker);

            let pct = percent(turn, total);
            tracker.report(
                SessionStatus::Generating,
                pct,
                format!("Turn {}/{}: {}", turn, total, profile.name),
            );

            if turn % interval == 0 {
                tracker.report(
                    SessionStatus::Summarizing,
                    pct,
                    format!("Summarizing at turn {}", turn),
                );
                self.summarize(&mut story, &mut context, turn, interval)
                    .await?;
            }
        }

        tracker.report(
            SessionStatus::Summarizing,
            100,
            "Generating master summary".to_string(),
        );
        let summaries: Vec<String> = story.summaries.iter().map(|s| s.summary.clone()).collect();
        story.master_summary = self
            .generator
            .generate(
                PersonaRole::MasterSummarizer,
                MASTER_SYSTEM_PROMPT,
                &master_user_prompt(&summaries),
            )
            .await?;

        let markdown = render_markdown(&story);
        Ok(StoryOutcome {
            data: story,
            markdown,
        })
    }

    async fn summarize(
        &self,
        story: &mut StoryState,
        context: &mut String,
        turn: usize,
        interval: usize,
    ) -> KahovitzResult<()> {
        let start = story.conversations.len().saturating_sub(interval);
        let segment = story.conversations[start..]
            .iter()
            .map(|t| format!("{}: {}", t.speaker, t.text))
            .collect::<Vec<_>>()
            .join("\n");

        let summary = self
            .generator
            .generate(
                PersonaRole::Summarizer,
                SUMMARIZER_SYSTEM_PROMPT,
                &summary_user_prompt(&segment),
            )
            .await?;
        story.summaries.push(Summary {
            turn,
            summary: summary.clone(),
        });

        if self.classifier.classify(&summary).await {
            debug!(turn, "Adding narration");
            let narration = self
                .generator
                .generate(
                    PersonaRole::Narrator,
                    NARRATOR_SYSTEM_PROMPT,
                    &narration_user_prompt(context, &summary),
                )
                .await?;
            context.push_str(&format!("\nNarrator: {}", narration));
            story.narrations.push(Narration { turn, narration });
        }

        Ok(())
    }
}
