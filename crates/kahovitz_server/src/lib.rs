//! HTTP surface for the Kahovitz story and posting services.
//!
//! [`router`] mounts the story endpoints (`/api/plan`, `/api/generate-story`,
//! `/api/generate-story-stream`, `/health`) and the posting endpoints
//! (`/post`, `/auto-tweet`, `/generate`, `/test-xvitz`, `/memory`,
//! `/clear-memory`, `/diagnose`, `/test`) over one [`AppState`].
//! Streaming story runs are tracked in a [`SessionStore`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod routes;
mod server;
mod sessions;
mod state;

pub use error::ApiError;
pub use routes::router;
pub use server::serve;
pub use sessions::{SessionSink, SessionStore};
pub use state::AppState;
