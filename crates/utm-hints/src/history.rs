//! Hint history: previously committed values per field.
//!
//! Sequences are most-recent-last, hold at most [`HISTORY_CAPACITY`] unique
//! entries, never repeat a field's default hints and never exist empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utm_core::{FieldCatalog, FieldName};

/// Maximum remembered values per field
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HintsHistory {
    entries: BTreeMap<FieldName, Vec<String>>,
}

impl HintsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the persisted JSON shape, skipping keys that are not field
    /// names and items that are not strings. `None` if `value` is not an
    /// object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut entries = BTreeMap::new();

        for (key, items) in object {
            let Ok(field) = key.parse::<FieldName>() else {
                tracing::warn!(key = %key, "dropping history for unknown field");
                continue;
            };
            let values: Vec<String> = items
                .as_array()
                .map(|list| {
                    list.iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            entries.insert(field, values);
        }

        Some(Self { entries })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.entries).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    /// Restore the invariants on data read from storage: no `url` key, no
    /// defaults, no duplicates or blanks, at most the newest
    /// [`HISTORY_CAPACITY`] items, no empty sequences.
    pub fn sanitize(&mut self, catalog: &FieldCatalog) {
        self.entries.remove(&FieldName::Url);

        for (field, values) in self.entries.iter_mut() {
            let config = catalog.get(*field);
            let mut kept: Vec<String> = Vec::with_capacity(values.len());

            for value in values.drain(..) {
                if value.is_empty() || config.has_default(&value) || kept.contains(&value) {
                    continue;
                }
                kept.push(value);
            }

            if kept.len() > HISTORY_CAPACITY {
                kept.drain(..kept.len() - HISTORY_CAPACITY);
            }
            *values = kept;
        }

        self.entries.retain(|_, values| !values.is_empty());
    }

    pub fn get(&self, field: FieldName) -> &[String] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: FieldName, value: &str) -> bool {
        self.get(field).iter().any(|v| v == value)
    }

    pub fn has_field(&self, field: FieldName) -> bool {
        self.entries.contains_key(&field)
    }

    /// Append `value`, evicting the oldest entries past capacity. The
    /// caller checks it is not a default and not already present.
    pub(crate) fn push(&mut self, field: FieldName, value: String) {
        let values = self.entries.entry(field).or_default();
        values.push(value);

        while values.len() > HISTORY_CAPACITY {
            let evicted = values.remove(0);
            tracing::debug!(field = %field, value = %evicted, "evicted oldest hint");
        }
    }

    /// Remove `value`; the field's key goes away with its last value
    pub(crate) fn remove(&mut self, field: FieldName, value: &str) -> bool {
        let Some(values) = self.entries.get_mut(&field) else {
            return false;
        };

        let before = values.len();
        values.retain(|v| v != value);
        let removed = values.len() != before;

        if values.is_empty() {
            self.entries.remove(&field);
        }

        removed
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.entries.keys().copied()
    }
}
