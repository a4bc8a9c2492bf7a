//! Mock implementations for testing.
//!
//! Unit and integration tests use these to exercise the stores without a
//! network or a filesystem.

pub mod http;
pub mod storage;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use storage::InMemoryStore;
