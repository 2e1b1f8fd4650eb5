//! Error types for `iot-actions`

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for action and session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while authorizing, invoking or tracking actions
#[derive(Debug, Error)]
pub enum Error {
    /// Invocation arity does not match the action's fixed argument count
    #[error("incorrect amount of arguments: needed {expected}, got {got}")]
    ArgumentCount { expected: u8, got: usize },

    /// Caller clearance, node membership or locality check failed
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Request payload could not be decoded into an argument list
    #[error("malformed arguments: {0}")]
    MalformedArguments(String),

    /// The action's execution routine failed
    ///
    /// The handler's error is kept as the source, untranslated
    #[error("execution failed: {0}")]
    Execution(#[source] anyhow::Error),

    /// Invocation did not finish before the caller's deadline
    #[error("execution timed out after {0:?}")]
    Timeout(Duration),

    /// No action registered under this id
    #[error("action not found: {0}")]
    ActionNotFound(Uuid),

    /// An action with this id is already registered
    #[error("action already registered: {0}")]
    DuplicateAction(Uuid),

    /// No active session with this id
    #[error("session not found: {0}")]
    SessionNotFound(i32),

    /// A session with this id is already active
    #[error("session already active: {0}")]
    DuplicateSession(i32),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the request itself was malformed or unauthorized
    ///
    /// These failures are deterministic: resending the same request fails
    /// the same way
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::ArgumentCount { .. } | Self::AuthorizationDenied(_) | Self::MalformedArguments(_)
        )
    }

    /// Whether the failure happened during execution and may be transient
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Execution(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_are_not_retryable() {
        let errors = [
            Error::ArgumentCount { expected: 2, got: 1 },
            Error::AuthorizationDenied("node blacklisted".to_string()),
            Error::MalformedArguments("not an array".to_string()),
        ];

        for err in errors {
            assert!(err.is_request_error(), "{err} should be a request error");
            assert!(!err.is_retryable(), "{err} should not be retryable");
        }
    }

    #[test]
    fn execution_errors_are_retryable() {
        let err = Error::Execution(anyhow::anyhow!("device unreachable"));
        assert!(err.is_retryable());
        assert!(!err.is_request_error());

        assert!(Error::Timeout(Duration::from_secs(1)).is_retryable());
    }

    #[test]
    fn argument_count_message() {
        let err = Error::ArgumentCount { expected: 2, got: 1 };
        assert_eq!(err.to_string(), "incorrect amount of arguments: needed 2, got 1");
    }

    #[test]
    fn execution_keeps_source() {
        let err = Error::Execution(anyhow::anyhow!("relay stuck"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("relay stuck"));
    }
}
