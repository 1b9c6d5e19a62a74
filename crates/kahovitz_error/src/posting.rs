//! Social posting errors.

/// Specific failure conditions when talking to the X (Twitter) API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PostingErrorKind {
    /// One of the OAuth credentials is absent
    #[display("Missing credential: {}", _0)]
    MissingCredential(String),
    /// Request could not be sent or the connection failed
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, details)]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw diagnostic payload attached by the provider
        details: String,
    },
    /// Provider refused the request because of a rate limit (403 or 429)
    #[display("Rate limited ({}): remaining={:?} reset={:?} {}", status, remaining, reset, details)]
    RateLimited {
        /// HTTP status code
        status: u16,
        /// Remaining requests in the current window, if reported
        remaining: Option<u32>,
        /// Unix timestamp (seconds) at which the window resets, if reported
        reset: Option<i64>,
        /// Raw diagnostic payload attached by the provider
        details: String,
    },
    /// Request signing failed
    #[display("Request signing failed: {}", _0)]
    Signing(String),
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Text is empty after sanitation
    #[display("Post text is empty")]
    EmptyText,
}

impl PostingErrorKind {
    /// Whether the provider reported a rate limit.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Reset timestamp when the quota is exhausted (`remaining == 0`).
    pub fn exhausted_until(&self) -> Option<i64> {
        match self {
            Self::RateLimited {
                remaining: Some(0),
                reset: Some(reset),
                ..
            } => Some(*reset),
            _ => None,
        }
    }

    /// Provider diagnostic payload, if any.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Api { details, .. } | Self::RateLimited { details, .. } => Some(details),
            _ => None,
        }
    }
}

/// Error raised by a posting client.
///
/// # Examples
///
/// ```
/// use kahovitz_error::{PostingError, PostingErrorKind};
///
/// let err = PostingError::new(PostingErrorKind::RateLimited {
///     status: 429,
///     remaining: Some(0),
///     reset: Some(1_700_000_000),
///     details: "Too Many Requests".to_string(),
/// });
/// assert!(err.kind.is_rate_limit());
/// assert_eq!(err.kind.exhausted_until(), Some(1_700_000_000));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Posting Error: {} at line {} in {}", kind, line, file)]
pub struct PostingError {
    /// The specific error condition
    pub kind: PostingErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PostingError {
    /// Create a new PostingError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PostingErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
