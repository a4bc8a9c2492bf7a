//! Common test utilities for integration tests.
//!
//! Fixtures shaped like the backend's JSON, plus helpers that wire an
//! [`App`] against a wiremock server.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let (app, storage) = test_app(&server);
//! ```

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use crm_client::adapters::{FileSecureStore, InMemoryStore, ReqwestHttpClient};
use crm_client::app::App;
use crm_client::config::AppConfig;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";

pub fn user_json(id: u64, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "password": DEMO_PASSWORD,
        "name": "Demo User",
        "role": "admin",
        "created_at": "2024-01-15T10:00:00.000Z"
    })
}

pub fn customer_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Customer {}", id),
        "email": format!("contact{}@example.com", id),
        "phone": "555-0100",
        "company": format!("Company {}", id),
        "created_at": "2024-01-01T00:00:00.000Z",
        "updated_at": "2024-01-01T00:00:00.000Z"
    })
}

/// `count` customers with ids `start..start + count`.
pub fn customers_json(start: usize, count: usize) -> Value {
    Value::Array(
        (start..start + count)
            .map(|i| customer_json(&i.to_string()))
            .collect(),
    )
}

pub fn lead_json(id: &str, customer_id: &str, status: &str, value: f64) -> Value {
    json!({
        "id": id,
        "customer_id": customer_id,
        "title": format!("Lead {}", id),
        "description": "Follow up",
        "status": status,
        "value": value,
        "created_at": "2024-02-01T00:00:00.000Z",
        "updated_at": "2024-02-01T00:00:00.000Z"
    })
}

/// Config pointing both resource families at one mock server.
pub fn test_config(server: &MockServer) -> AppConfig {
    AppConfig::default()
        .with_api_base_url(server.uri())
        .with_auth_base_url(server.uri())
}

/// An app using real HTTP against `server` and an in-memory secure store.
pub fn test_app(server: &MockServer) -> (App, InMemoryStore) {
    let storage = InMemoryStore::new();
    let app = App::new(
        test_config(server),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(storage.clone()),
    );
    (app, storage)
}

/// An app persisting to a file store under `data_dir`.
pub fn file_backed_app(server: &MockServer, data_dir: &Path) -> App {
    let config = test_config(server).with_data_dir(data_dir);
    let storage = Arc::new(FileSecureStore::new(&config.data_dir));
    App::new(config, Arc::new(ReqwestHttpClient::new()), storage)
}
