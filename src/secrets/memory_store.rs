//! secrets::memory_store
//!
//! In-process secret store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{SecretError, SecretStore};

/// Secret store backed by a shared map.
///
/// Clones share the same contents, so a test can hand one clone to the
/// code under test and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with entries.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            for (key, value) in entries {
                values.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SecretError> {
        self.values
            .lock()
            .map_err(|_| SecretError::ReadError("memory store poisoned".into()))
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
