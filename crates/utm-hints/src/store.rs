//! Hint history store: merges default hints with remembered values and
//! records new values on explicit commit.

use std::sync::Arc;

use utm_core::{FieldCatalog, FieldName, FieldValueMap};
use utm_store::StoreError;

use crate::history::HintsHistory;
use crate::repository::HintsRepository;
use crate::suggestion::{filter_by_prefix, HintConfig};

pub struct HintStore<R: HintsRepository> {
    catalog: Arc<FieldCatalog>,
    history: HintsHistory,
    repository: R,
}

impl<R: HintsRepository> HintStore<R> {
    /// Load history once from `repository`
    pub fn open(catalog: Arc<FieldCatalog>, repository: R) -> Self {
        let mut history = repository.load();
        history.sanitize(&catalog);

        Self {
            catalog,
            history,
            repository,
        }
    }

    /// Defaults in declared order, then history in stored order. A value
    /// present in both stays a non-removable default.
    pub fn suggestions(&self, field: FieldName) -> Vec<HintConfig> {
        let mut hints: Vec<HintConfig> = Vec::new();

        for value in self.catalog.default_hints(field) {
            if !hints.iter().any(|h| &h.value == value) {
                hints.push(HintConfig::fixed(value.clone()));
            }
        }

        for value in self.history.get(field) {
            if !hints.iter().any(|h| &h.value == value) {
                hints.push(HintConfig::removable(value.clone()));
            }
        }

        hints
    }

    /// Suggestions starting with what the user typed so far
    pub fn suggestions_matching(&self, field: FieldName, typed: &str) -> Vec<HintConfig> {
        filter_by_prefix(self.suggestions(field), typed)
    }

    /// Remember the current values and persist the whole history.
    ///
    /// Returns how many new hints were recorded. On a failed write the
    /// in-memory history keeps the new values.
    pub fn commit(&mut self, values: &FieldValueMap) -> Result<usize, StoreError> {
        let mut added = 0;

        for (field, value) in values {
            if field.is_url() || value.is_empty() {
                continue;
            }
            if self.catalog.get(*field).has_default(value) || self.history.contains(*field, value) {
                continue;
            }

            self.history.push(*field, value.clone());
            added += 1;
        }

        tracing::info!(added, "committing hint history");
        self.repository.save(&self.history)?;
        Ok(added)
    }

    /// Forget one remembered value. Returns whether anything was removed.
    pub fn remove(&mut self, field: FieldName, value: &str) -> Result<bool, StoreError> {
        let removed = self.history.remove(field, value);
        if removed {
            tracing::info!(field = %field, value, "removed hint");
        }

        self.repository.save(&self.history)?;
        Ok(removed)
    }

    pub fn history(&self) -> &HintsHistory {
        &self.history
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }
}
