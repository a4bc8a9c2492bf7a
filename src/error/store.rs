//! Errors surfaced by the entity stores.

use thiserror::Error;

use super::category::ErrorCategory;
use super::remote::RemoteError;
use crate::models::EntityKind;

/// Coarse failure re-signalled to the caller of a store operation.
///
/// The store cache is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Failed to fetch {entity}s")]
    FetchFailed {
        entity: EntityKind,
        #[source]
        source: RemoteError,
    },

    #[error("Failed to create {entity}")]
    CreateFailed {
        entity: EntityKind,
        #[source]
        source: RemoteError,
    },

    #[error("Failed to update {entity}")]
    UpdateFailed {
        entity: EntityKind,
        #[source]
        source: RemoteError,
    },

    #[error("Failed to delete {entity}")]
    DeleteFailed {
        entity: EntityKind,
        #[source]
        source: RemoteError,
    },

    /// The entity does not exist (remotely, or no entity is selected).
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },
}

impl StoreError {
    /// The remote failure behind this error, if any.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            StoreError::FetchFailed { source, .. }
            | StoreError::CreateFailed { source, .. }
            | StoreError::UpdateFailed { source, .. }
            | StoreError::DeleteFailed { source, .. } => Some(source),
            StoreError::NotFound { .. } => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.remote() {
            Some(remote) => remote.category(),
            None => ErrorCategory::Client,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::FetchFailed { .. } => "E_STORE_FETCH",
            StoreError::CreateFailed { .. } => "E_STORE_CREATE",
            StoreError::UpdateFailed { .. } => "E_STORE_UPDATE",
            StoreError::DeleteFailed { .. } => "E_STORE_DELETE",
            StoreError::NotFound { .. } => "E_STORE_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_entity() {
        let err = StoreError::CreateFailed {
            entity: EntityKind::Customer,
            source: RemoteError::Status {
                status: 400,
                message: "bad".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Failed to create customer");
        assert_eq!(err.remote().and_then(RemoteError::status), Some(400));
    }

    #[test]
    fn test_not_found_has_no_remote() {
        let err = StoreError::NotFound {
            entity: EntityKind::Lead,
            id: "l1".to_string(),
        };
        assert!(err.remote().is_none());
        assert_eq!(err.to_string(), "lead l1 not found");
        assert_eq!(err.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_category_follows_remote() {
        let err = StoreError::DeleteFailed {
            entity: EntityKind::Lead,
            source: RemoteError::Network {
                message: "offline".to_string(),
            },
        };
        assert_eq!(err.category(), ErrorCategory::Network);
    }
}
