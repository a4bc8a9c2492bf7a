//! Local secure storage trait abstraction.
//!
//! A small string key-value store that survives process restarts. Only the
//! auth and theme stores touch it, each under its own keys.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed
    #[error("Storage IO error: {0}")]
    Io(String),
    /// The persisted data could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(String),
    /// The store cannot be located (e.g. no home directory)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait for key-value persistence of the session token, user and theme.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
