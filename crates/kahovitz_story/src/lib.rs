//! Turn-based story pipeline for Kahovitz.
//!
//! A story run alternates two characters for a fixed number of turns,
//! summarizes every few turns, lets a classifier decide whether a narrator
//! should step in, and closes with a master summary:
//!
//! - [`StoryPlanner`] turns a rough idea into a refined prompt, phase plan and opening scene
//! - [`select_phase`] maps a turn to its narrative phase
//! - [`ContentGenerator`] routes each persona to its own driver and model settings
//! - [`GroqClassifier`] answers the narration question
//! - [`StoryOrchestrator`] runs the loop and reports progress
//! - [`render_markdown`] renders the finished story

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classifier;
mod extraction;
mod generator;
mod markdown;
mod orchestrator;
mod persona;
mod phase;
mod plan;
pub mod prompts;

pub use classifier::{GroqClassifier, sanitize_classifier_response};
pub use extraction::{extract_json, parse_json};
pub use generator::ContentGenerator;
pub use markdown::render_markdown;
pub use orchestrator::{StoryOptions, StoryOrchestrator, StoryOutcome, StoryRequest};
pub use persona::PersonaRole;
pub use phase::select_phase;
pub use plan::{StoryPlanner, parse_plan_response};
