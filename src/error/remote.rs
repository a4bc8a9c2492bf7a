//! Errors raised by the Remote Resource Clients.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Failure of a single REST call.
///
/// Every non-2xx response and every transport failure surfaces as one of
/// these; the clients never retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("Network failure: {message}")]
    Network { message: String },

    /// The backend answered with a non-2xx status.
    #[error("Remote error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The request body could not be serialized; nothing was sent.
    #[error("Invalid request body: {message}")]
    Encode { message: String },

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response body: {message}")]
    Decode { message: String },
}

impl RemoteError {
    /// HTTP status if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 answer.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RemoteError::Network { .. } => ErrorCategory::Network,
            RemoteError::Status { status, .. } => ErrorCategory::from_status(*status),
            RemoteError::Encode { .. } => ErrorCategory::Client,
            RemoteError::Decode { .. } => ErrorCategory::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RemoteError::Network { .. } => "E_NET",
            RemoteError::Status { .. } => "E_REMOTE_STATUS",
            RemoteError::Encode { .. } => "E_REMOTE_ENCODE",
            RemoteError::Decode { .. } => "E_REMOTE_DECODE",
        }
    }
}

impl From<HttpError> for RemoteError {
    fn from(err: HttpError) -> Self {
        RemoteError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_conversion() {
        let err: RemoteError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, RemoteError::Network { .. }));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_encode_is_distinct_from_decode() {
        let err = RemoteError::Encode {
            message: "key must be a string".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid request body: key must be a string");
        assert_eq!(err.error_code(), "E_REMOTE_ENCODE");
        assert_eq!(err.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_status_category() {
        let err = RemoteError::Status {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Server);
        assert!(err.category().is_retryable());
    }

    #[test]
    fn test_display() {
        let err = RemoteError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Remote error (500): boom");
    }
}
