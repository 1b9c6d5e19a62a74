//! Text-generation provider errors.

/// Specific failure conditions when calling a chat-completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No API key configured for the requested persona
    #[display("Missing credential: {}", _0)]
    MissingCredential(String),
    /// Request could not be sent or the connection failed
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body returned by the provider
        message: String,
    },
    /// Provider rejected the request with 429
    #[display("Rate limit exceeded: {}", _0)]
    RateLimit(String),
    /// Requested model is unknown to the provider
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Response decoded but carried no text output
    #[display("Provider returned no text output")]
    EmptyResponse,
    /// Request or message builder failed
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl GenerationErrorKind {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimit(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Error raised by a text-generation driver.
///
/// # Examples
///
/// ```
/// use kahovitz_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Api {
///     status: 401,
///     message: "invalid api key".to_string(),
/// });
/// assert!(format!("{}", err).contains("401"));
/// assert!(!err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
