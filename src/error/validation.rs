//! Client-side validation failures.

use thiserror::Error;

/// A form or payload was rejected before any request was sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("Passwords must match")]
    PasswordMismatch,

    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },
}

impl ValidationError {
    /// Name of the offending form field, for highlighting.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::NotPositive { field } => field,
            ValidationError::InvalidEmail => "email",
            ValidationError::PasswordMismatch => "confirm_password",
        }
    }
}
