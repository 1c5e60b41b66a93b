//! In-memory backend, used by tests and short-lived sessions.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::kv::{KeyValueStore, SetOptions, StoredEntry};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .and_then(|entry| entry.live_value())
            .map(str::to_string)
    }

    fn set_raw(&mut self, name: &str, raw: String, options: &SetOptions) -> Result<(), StoreError> {
        self.entries.insert(
            name.to_string(),
            StoredEntry {
                value: raw,
                options: options.clone(),
            },
        );
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        self.entries.remove(name);
        Ok(())
    }
}
