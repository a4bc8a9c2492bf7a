//! Authentication error types.

use thiserror::Error;

use super::category::ErrorCategory;
use super::remote::RemoteError;

/// Outcome of a failed login or registration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// No account matches the supplied credentials, or the lookup failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Account creation was rejected (duplicate email, network error, ...).
    #[error("Registration failed")]
    RegistrationFailed {
        #[source]
        source: RemoteError,
    },

    /// No session is active.
    #[error("Not signed in")]
    NotAuthenticated,
}

impl AuthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => ErrorCategory::Auth,
            AuthError::RegistrationFailed { source } => match source {
                RemoteError::Status { status, .. } if *status < 500 => ErrorCategory::User,
                other => other.category(),
            },
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password.".to_string(),
            AuthError::RegistrationFailed { .. } => {
                "Could not create your account. Please try again.".to_string()
            }
            AuthError::NotAuthenticated => "Please sign in to continue.".to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "E_AUTH_INVALID",
            AuthError::RegistrationFailed { .. } => "E_AUTH_REGISTER",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials() {
        let err = AuthError::InvalidCredentials;
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert_eq!(err.error_code(), "E_AUTH_INVALID");
    }

    #[test]
    fn test_registration_conflict_is_user_actionable() {
        let err = AuthError::RegistrationFailed {
            source: RemoteError::Status {
                status: 409,
                message: "exists".to_string(),
            },
        };
        assert_eq!(err.category(), ErrorCategory::User);
    }

    #[test]
    fn test_registration_network_failure_is_retryable() {
        let err = AuthError::RegistrationFailed {
            source: RemoteError::Network {
                message: "offline".to_string(),
            },
        };
        assert!(err.category().is_retryable());
    }
}
