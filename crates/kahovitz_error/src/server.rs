//! HTTP listener errors.

/// Failure conditions of the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// The listen address could not be bound
    #[display("Failed to bind {}: {}", addr, reason)]
    Bind {
        /// Address that was requested
        addr: String,
        /// Reason reported by the OS
        reason: String,
    },
    /// The accept loop stopped with an I/O error
    #[display("Server stopped: {}", _0)]
    Serve(String),
}

/// Error raised while running the HTTP listener.
///
/// # Examples
///
/// ```
/// use kahovitz_error::{KahovitzError, ServerError, ServerErrorKind};
///
/// let err: KahovitzError = ServerError::new(ServerErrorKind::Bind {
///     addr: "0.0.0.0:80".to_string(),
///     reason: "permission denied".to_string(),
/// })
/// .into();
/// assert_eq!(err.message(), "Failed to bind 0.0.0.0:80: permission denied");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The specific error condition
    pub kind: ServerErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
