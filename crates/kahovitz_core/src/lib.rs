//! Core data types for the Kahovitz story and social services.
//!
//! This crate provides the request/response types shared by every driver,
//! the story data model produced by the pipeline, and logging setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod logging;
mod message;
mod model_config;
mod output;
mod request;
mod role;
mod story;

pub use logging::init_logging;
pub use message::{Message, MessageBuilder};
pub use model_config::{DEFAULT_MODEL, ModelConfig};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use story::{
    CharacterProfile, Narration, Phase, PhasePlan, PhaseSelection, StoryPlan, StoryState,
    Summary, Turn,
};
