//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, JsonError, PostingError, ServerError, StoryError};

/// Every error condition a Kahovitz crate can raise.
///
/// # Examples
///
/// ```
/// use kahovitz_error::{JsonError, KahovitzError};
///
/// let err: KahovitzError = JsonError::new("expected value at line 1").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum KahovitzErrorKind {
    /// HTTP listener error
    #[from(ServerError)]
    Server(ServerError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text-generation provider error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Social posting error
    #[from(PostingError)]
    Posting(PostingError),
    /// Story pipeline error
    #[from(StoryError)]
    Story(StoryError),
}

/// Kahovitz error with kind discrimination.
///
/// # Examples
///
/// ```
/// use kahovitz_error::{ConfigError, KahovitzErrorKind, KahovitzResult};
///
/// fn load() -> KahovitzResult<()> {
///     Err(ConfigError::new("missing [server] table"))?
/// }
///
/// let err = load().unwrap_err();
/// assert!(matches!(err.kind(), KahovitzErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Kahovitz Error: {}", _0)]
pub struct KahovitzError(Box<KahovitzErrorKind>);

impl KahovitzError {
    /// Create a new error from a kind.
    pub fn new(kind: KahovitzErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &KahovitzErrorKind {
        &self.0
    }

    /// Whether this error stems from invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), KahovitzErrorKind::Story(e) if e.kind.is_validation())
    }

    /// The failure condition without source location, for client-facing bodies.
    ///
    /// # Examples
    ///
    /// ```
    /// use kahovitz_error::{KahovitzError, StoryError, StoryErrorKind};
    ///
    /// let err: KahovitzError =
    ///     StoryError::new(StoryErrorKind::MissingField("text".to_string())).into();
    /// assert_eq!(err.message(), "text is required");
    /// ```
    pub fn message(&self) -> String {
        match self.kind() {
            KahovitzErrorKind::Story(e) => e.kind.to_string(),
            KahovitzErrorKind::Generation(e) => e.kind.to_string(),
            KahovitzErrorKind::Posting(e) => e.kind.to_string(),
            KahovitzErrorKind::Server(e) => e.kind.to_string(),
            other => other.to_string(),
        }
    }

    /// Provider diagnostic payload carried by the error, if any.
    pub fn details(&self) -> Option<String> {
        match self.kind() {
            KahovitzErrorKind::Posting(e) => e.kind.details().map(str::to_string),
            KahovitzErrorKind::Generation(e) => match &e.kind {
                crate::GenerationErrorKind::Api { message, .. } => Some(message.clone()),
                _ => None,
            },
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to KahovitzErrorKind
impl<T> From<T> for KahovitzError
where
    T: Into<KahovitzErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Kahovitz operations.
pub type KahovitzResult<T> = std::result::Result<T, KahovitzError>;
