//! Command-line interface module.
//!
//! CLI structure and command handlers for the kahovitz binary.

mod commands;
mod serve;
mod social;
mod story;

pub use commands::{Cli, Commands, StoryArgs};
pub use serve::run_server;
pub use social::auto_tweet;
pub use story::{plan_story, write_story};
