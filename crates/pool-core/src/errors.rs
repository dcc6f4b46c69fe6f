//! Error types for pool-watch

use thiserror::Error;

use crate::types::constants::GENERIC_FETCH_ERROR;

/// Top-level errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Lock registry fetch failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Backend returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Result type alias for pool-watch operations
pub type Result<T> = std::result::Result<T, Error>;

impl FetchError {
    /// Text for the error banner.
    ///
    /// Server-supplied messages are shown verbatim; everything else collapses
    /// to the generic failure text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Not authenticated".to_string(),
            Self::Server { message, .. } => message.clone(),
            Self::Transport(_) | Self::Decode(_) => GENERIC_FETCH_ERROR.to_string(),
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Server { .. } => "backend_error",
            Self::Transport(_) => "backend_unreachable",
            Self::Decode(_) => "bad_backend_response",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Server { .. } | Self::Decode(_) => 502,
            Self::Transport(_) => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_preferred() {
        let err = FetchError::Server {
            status: 403,
            message: "Subscription expired".into(),
        };
        assert_eq!(err.user_message(), "Subscription expired");
        assert_eq!(err.error_code(), "backend_error");
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_generic_message_fallback() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
        assert_eq!(err.status_code(), 503);

        let err = FetchError::Decode("expected value".into());
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }

    #[test]
    fn test_unauthenticated() {
        let err = FetchError::Unauthenticated;
        assert_eq!(err.user_message(), "Not authenticated");
        assert_eq!(err.status_code(), 401);
    }
}
