//! Transit error types

use thiserror::Error;

/// Errors that can occur during transit operations
#[derive(Debug, Error)]
pub enum TransitError {
    /// The HTTP request failed (connection, timeout, or non-success status)
    #[error("Transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded as well-formed XML
    #[error("Parse error: {0}")]
    Parse(String),

    /// The endpoint reported an application-level error in its envelope
    #[error("Remote error {code}: {message}")]
    Remote {
        /// Error code reported by the endpoint ("000" means no error)
        code: String,
        /// Human-readable message reported by the endpoint
        message: String,
    },

    /// The response parsed but lacks the nested structure the operation expects
    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

impl TransitError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(TransitError::Transport("connection refused".to_string()).is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!TransitError::Parse("bad xml".to_string()).is_retryable());
        assert!(!TransitError::Shape("missing records".to_string()).is_retryable());
        assert!(
            !TransitError::Remote {
                code: "010".to_string(),
                message: "unknown line".to_string(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = TransitError::Remote {
            code: "010".to_string(),
            message: "unknown line".to_string(),
        };
        assert!(err.to_string().contains("010"));
        assert!(err.to_string().contains("unknown line"));

        let err = TransitError::Shape("missing alss.als".to_string());
        assert!(err.to_string().contains("alss.als"));
    }
}
