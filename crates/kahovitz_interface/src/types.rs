//! Shared value types for the interface traits.

use kahovitz_core::StoryState;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a story run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Accepted, nothing generated yet
    Starting,
    /// Producing dialogue turns
    Generating,
    /// Producing interval or master summaries
    Summarizing,
    /// Finished successfully
    Complete,
    /// Aborted by an error
    Failed,
}

impl SessionStatus {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// One progress report from a story run.
///
/// # Examples
///
/// ```
/// use kahovitz_interface::{ProgressUpdate, SessionStatus};
///
/// let update = ProgressUpdate::new(SessionStatus::Generating, 25, "Turn 5/20");
/// assert_eq!(*update.status(), SessionStatus::Generating);
/// assert!(update.story().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// Current status
    status: SessionStatus,
    /// Completion percentage, 0 to 100
    progress: u8,
    /// Human-readable status line
    message: String,
    /// Final story, present once complete
    #[serde(skip_serializing_if = "Option::is_none")]
    story: Option<StoryState>,
    /// Markdown rendering of the final story
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<String>,
    /// Failure description, present once failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProgressUpdate {
    /// Create a report without a payload.
    pub fn new(status: SessionStatus, progress: u8, message: impl Into<String>) -> Self {
        Self {
            status,
            progress: progress.min(100),
            message: message.into(),
            story: None,
            markdown: None,
            error: None,
        }
    }

    /// Terminal report carrying the finished story.
    pub fn complete(story: StoryState, markdown: String) -> Self {
        Self {
            story: Some(story),
            markdown: Some(markdown),
            ..Self::new(SessionStatus::Complete, 100, "Story complete")
        }
    }

    /// Terminal report carrying a failure description.
    pub fn failed(progress: u8, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            error: Some(error.clone()),
            ..Self::new(SessionStatus::Failed, progress, error)
        }
    }
}

/// A status created by a posting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostedStatus {
    /// Provider-assigned id
    pub id: String,
    /// Text as published
    pub text: String,
}

/// The account a posting client is authenticated as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosterAccount {
    /// Provider-assigned id
    pub id: String,
    /// Handle without the leading `@`
    pub username: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl PosterAccount {
    /// Public URL of a status posted by this account on X.
    ///
    /// # Examples
    ///
    /// ```
    /// use kahovitz_interface::PosterAccount;
    ///
    /// let account = PosterAccount {
    ///     id: "1".to_string(),
    ///     username: "moscownpur".to_string(),
    ///     name: String::new(),
    /// };
    /// assert_eq!(account.status_url("42"), "https://x.com/moscownpur/status/42");
    /// ```
    pub fn status_url(&self, status_id: &str) -> String {
        format!("https://x.com/{}/status/{}", self.username, status_id)
    }
}
