//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP operations used by the Remote Resource Clients
//! - [`SecureStore`] - key-value persistence for the session and theme

pub mod http;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use storage::{SecureStore, StorageError};
