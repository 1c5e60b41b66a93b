//! NAPI bindings for hint history, backed by a JSON file

use napi::bindgen_prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use utm_core::{FieldCatalog, FieldName, FieldValueMap};
use utm_hints::{highlight, HintStore, KvHintsRepository};
use utm_store::FileStore;

use crate::to_napi;

#[napi(object)]
pub struct HintItem {
    pub value: String,
    pub removable: bool,
    /// Leading part the user already typed
    pub matched: String,
    /// Completion to render emphasized
    pub rest: String,
}

#[napi]
pub struct HintSession {
    store: HintStore<KvHintsRepository<FileStore>>,
}

#[napi]
impl HintSession {
    #[napi(constructor)]
    pub fn new(store_path: String) -> Self {
        let repository = KvHintsRepository::new(FileStore::open(store_path));
        Self {
            store: HintStore::open(Arc::new(FieldCatalog::builtin()), repository),
        }
    }

    #[napi]
    pub fn suggestions(&self, field: String, prefix: Option<String>) -> Result<Vec<HintItem>> {
        let field: FieldName = field.parse().map_err(to_napi)?;
        let typed = prefix.unwrap_or_default();

        Ok(self
            .store
            .suggestions_matching(field, &typed)
            .into_iter()
            .map(|hint| {
                let parts = highlight(&hint.value, &typed);
                HintItem {
                    matched: parts.matched.to_string(),
                    rest: parts.rest.to_string(),
                    value: hint.value.clone(),
                    removable: hint.removable,
                }
            })
            .collect())
    }

    /// Remember valid values from a JSON object keyed by field. Returns the
    /// number of new hints.
    #[napi]
    pub fn commit(&mut self, values_json: String) -> Result<u32> {
        let raw: BTreeMap<FieldName, String> = serde_json::from_str(&values_json).map_err(to_napi)?;
        let catalog = FieldCatalog::builtin();
        let values: FieldValueMap = raw
            .into_iter()
            .filter(|(field, value)| catalog.validate(*field, value).is_valid())
            .collect();

        let added = self.store.commit(&values).map_err(to_napi)?;
        Ok(added as u32)
    }

    #[napi]
    pub fn remove(&mut self, field: String, value: String) -> Result<bool> {
        let field: FieldName = field.parse().map_err(to_napi)?;
        self.store.remove(field, &value).map_err(to_napi)
    }

    #[napi]
    pub fn history_json(&self) -> Result<String> {
        serde_json::to_string(self.store.history()).map_err(to_napi)
    }
}
