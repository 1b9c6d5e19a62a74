//! Story pipeline errors.

/// Specific failure conditions in the story pipeline and its HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// A required request field is missing or blank
    #[display("{} is required", _0)]
    MissingField(String),
    /// A numeric parameter is out of range
    #[display("Invalid parameter: {}", _0)]
    InvalidParameter(String),
    /// Character profiles must come in a pair
    #[display("Exactly two characters are required, got {}", _0)]
    CharacterCount(usize),
}

impl StoryErrorKind {
    /// Whether the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidParameter(_) | Self::CharacterCount(_)
        )
    }
}

/// Error raised by the story pipeline.
///
/// # Examples
///
/// ```
/// use kahovitz_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::MissingField("roughIdea".to_string()));
/// assert!(err.to_string().contains("roughIdea is required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
