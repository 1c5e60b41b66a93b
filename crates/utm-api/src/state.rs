//! Shared service state. Every mutable part sits behind a mutex so
//! requests touching hints or the language are applied one at a time.
use std::sync::{Arc, Mutex, MutexGuard};

use utm_core::FieldCatalog;
use utm_hints::{HintStore, KvHintsRepository};
use utm_i18n::LanguageStore;
use utm_store::{FileStore, SharedStore};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::metrics::Metrics;

pub type ServiceHints = HintStore<KvHintsRepository<SharedStore>>;
pub type ServiceLanguage = LanguageStore<SharedStore>;
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub catalog: Arc<FieldCatalog>,
    pub metrics: Metrics,
    hints: Mutex<ServiceHints>,
    language: Mutex<ServiceLanguage>,
}

impl AppState {
    /// Wire the hint and language stores to one shared key/value store
    pub fn new(catalog: FieldCatalog, store: SharedStore) -> Result<Self, ApiError> {
        let catalog = Arc::new(catalog);
        let hints = HintStore::open(Arc::clone(&catalog), KvHintsRepository::new(store.clone()));
        let language = LanguageStore::open(store)?;

        Ok(Self {
            catalog,
            metrics: Metrics::new()?,
            hints: Mutex::new(hints),
            language: Mutex::new(language),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let catalog = config.load_catalog()?;
        let store = SharedStore::new(FileStore::open(config.store_path()));
        tracing::info!(store = %config.store_path().display(), "opened data store");
        Self::new(catalog, store)
    }

    pub fn hints(&self) -> MutexGuard<'_, ServiceHints> {
        self.hints.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn language(&self) -> MutexGuard<'_, ServiceLanguage> {
        self.language.lock().unwrap_or_else(|p| p.into_inner())
    }
}
