//! In-memory [`SecureStore`] for testing.
//!
//! Each operation can be told to fail so tests can exercise the
//! best-effort persistence paths of the auth and theme stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{SecureStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    get_should_fail: Arc<Mutex<bool>>,
    set_should_fail: Arc<Mutex<bool>>,
    /// Keys whose removal fails.
    remove_should_fail: Arc<Mutex<Vec<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut values = store.values.lock().unwrap();
            for (key, value) in entries {
                values.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    pub fn set_get_should_fail(&self, should_fail: bool) {
        *self.get_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_set_should_fail(&self, should_fail: bool) {
        *self.set_should_fail.lock().unwrap() = should_fail;
    }

    /// Make `remove(key)` fail for this key.
    pub fn fail_remove_of(&self, key: &str) {
        self.remove_should_fail.lock().unwrap().push(key.to_string());
    }

    /// Read a value synchronously (for assertions).
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Write a value synchronously (for test setup).
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl SecureStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if *self.get_should_fail.lock().unwrap() {
            return Err(StorageError::Io("Mock get failure".to_string()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.set_should_fail.lock().unwrap() {
            return Err(StorageError::Io("Mock set failure".to_string()));
        }
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self
            .remove_should_fail
            .lock()
            .unwrap()
            .iter()
            .any(|k| k == key)
        {
            return Err(StorageError::Io("Mock remove failure".to_string()));
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
