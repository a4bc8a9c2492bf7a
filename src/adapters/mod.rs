//! Concrete implementations of the trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSecureStore`] - JSON-file key-value storage
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - configurable HTTP responses
//! - [`mock::InMemoryStore`] - in-memory key-value storage

pub mod file_storage;
pub mod mock;
pub mod reqwest_http;

pub use file_storage::FileSecureStore;
pub use mock::{InMemoryStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
