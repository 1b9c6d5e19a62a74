//! Error types for the Kahovitz services.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location that raised it
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
//!
//! fn call_provider() -> KahovitzResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::EmptyResponse))?
//! }
//!
//! let err = call_provider().unwrap_err();
//! assert!(err.to_string().contains("no text"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod posting;
mod server;
mod story;

pub use config::ConfigError;
pub use error::{KahovitzError, KahovitzErrorKind, KahovitzResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use posting::{PostingError, PostingErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use story::{StoryError, StoryErrorKind};
