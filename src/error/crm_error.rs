//! Unified error type for the CRM client.
//!
//! `CrmError` consolidates the per-layer errors so the view layer can
//! categorize, word and retry failures uniformly.

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::remote::RemoteError;
use super::store::StoreError;
use super::validation::ValidationError;
use crate::traits::StorageError;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CrmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CrmError::Remote(err) => err.category(),
            CrmError::Store(err) => err.category(),
            CrmError::Auth(err) => err.category(),
            CrmError::Validation(_) => ErrorCategory::User,
            CrmError::Storage(_) => ErrorCategory::System,
            CrmError::Config(_) => ErrorCategory::Configuration,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Message suitable for an alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            CrmError::Auth(err) => err.user_message(),
            CrmError::Validation(err) => err.to_string(),
            CrmError::Store(StoreError::NotFound { entity, .. }) => {
                format!("That {} no longer exists.", entity)
            }
            CrmError::Store(err) => format!("{}. {}.", err, self.category().recovery_hint()),
            other => format!("{}. {}.", other, other.category().recovery_hint()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CrmError::Remote(err) => err.error_code(),
            CrmError::Store(err) => err.error_code(),
            CrmError::Auth(err) => err.error_code(),
            CrmError::Validation(_) => "E_VALIDATION",
            CrmError::Storage(_) => "E_STORAGE",
            CrmError::Config(_) => "E_CONFIG",
        }
    }
}

/// Result alias used by the `App` facade.
pub type CrmResult<T> = Result<T, CrmError>;
