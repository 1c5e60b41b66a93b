//! Where hint history is persisted.
//!
//! Reads are best-effort: missing or corrupted data loads as an empty
//! history. Writes report failures to the caller.

use std::sync::{Arc, Mutex};

use utm_store::{KeyValueStore, SetOptions, StoreError, StoredValue};

use crate::history::HintsHistory;

/// Storage key of the persisted history
pub const HISTORY_KEY: &str = "hintsHistory";

pub trait HintsRepository: Send {
    fn load(&self) -> HintsHistory;
    fn save(&mut self, history: &HintsHistory) -> Result<(), StoreError>;
}

/// History kept under [`HISTORY_KEY`] in a key/value store
#[derive(Debug)]
pub struct KvHintsRepository<S: KeyValueStore> {
    store: S,
    options: SetOptions,
}

impl<S: KeyValueStore> KvHintsRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: SetOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SetOptions) -> Self {
        self.options = options;
        self
    }
}

impl<S: KeyValueStore> HintsRepository for KvHintsRepository<S> {
    fn load(&self) -> HintsHistory {
        match self.store.get(HISTORY_KEY) {
            None => HintsHistory::new(),
            Some(StoredValue::Json(value)) => HintsHistory::from_value(&value).unwrap_or_else(|| {
                tracing::warn!(key = HISTORY_KEY, "stored history is not an object, ignoring it");
                HintsHistory::new()
            }),
            Some(StoredValue::Raw(_)) => {
                tracing::warn!(key = HISTORY_KEY, "stored history is not JSON, ignoring it");
                HintsHistory::new()
            }
        }
    }

    fn save(&mut self, history: &HintsHistory) -> Result<(), StoreError> {
        self.store.set(HISTORY_KEY, &history.to_value(), &self.options)
    }
}

/// Test double keeping the last saved history in memory. Clones share
/// state, so a test can hand one to a store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHintsRepository {
    saved: Arc<Mutex<HintsHistory>>,
    fail_writes: bool,
}

impl InMemoryHintsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: HintsHistory) -> Self {
        Self {
            saved: Arc::new(Mutex::new(history)),
            fail_writes: false,
        }
    }

    /// Make every subsequent save fail
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn saved(&self) -> HintsHistory {
        self.saved.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl HintsRepository for InMemoryHintsRepository {
    fn load(&self) -> HintsHistory {
        self.saved()
    }

    fn save(&mut self, history: &HintsHistory) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "history writes disabled",
            )));
        }

        let mut saved = self.saved.lock().unwrap_or_else(|p| p.into_inner());
        *saved = history.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use utm_core::FieldName;
    use utm_store::MemoryStore;

    #[test]
    fn test_missing_key_loads_empty() {
        let repo = KvHintsRepository::new(MemoryStore::new());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_corrupt_values_load_empty() {
        let mut store = MemoryStore::new();
        store.set_raw(HISTORY_KEY, "{broken".to_string(), &SetOptions::default()).unwrap();
        assert!(KvHintsRepository::new(store).load().is_empty());

        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, &json!([1, 2, 3]), &SetOptions::default()).unwrap();
        assert!(KvHintsRepository::new(store).load().is_empty());
    }

    #[test]
    fn test_expired_history_loads_empty() {
        let mut history = HintsHistory::new();
        history.push(FieldName::Term, "shoes".to_string());

        let expired = SetOptions::default().expires_in(chrono::Duration::seconds(-1));
        let mut repo = KvHintsRepository::new(MemoryStore::new()).with_options(expired);
        repo.save(&history).unwrap();

        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut history = HintsHistory::new();
        history.push(FieldName::Source, "bing.com".to_string());

        let mut repo = KvHintsRepository::new(MemoryStore::new());
        repo.save(&history).unwrap();
        assert_eq!(repo.load(), history);
    }
}
