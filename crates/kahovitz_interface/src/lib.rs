//! Trait definitions for the Kahovitz story and social services.
//!
//! The traits here are the seams between the pipeline and its outbound
//! collaborators: the text-generation provider, the narration classifier,
//! the posting service, and whoever observes run progress.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{KahovitzDriver, NarrationClassifier, NullProgress, ProgressSink, StatusPoster};
pub use types::{PostedStatus, PosterAccount, ProgressUpdate, SessionStatus};
