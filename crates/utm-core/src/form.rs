//! Form state: per-field validation transitions feeding URL composition.
//!
//! A field is re-validated when its value changes or it loses focus, never
//! per keystroke. Only values that pass validation enter the value map, and
//! composition re-runs after every transition. A required field that was
//! never validated blocks composition.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::compose::{compose, FieldValueMap, NotComposable};
use crate::field::{FieldCatalog, FieldName};
use crate::validation::ValidationErrorKind;

/// Validation state per field; an absent key means "not yet validated"
pub type FieldValidationMap = BTreeMap<FieldName, ValidationErrorKind>;

/// Result of applying one field event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldUpdate {
    pub field: FieldName,
    pub kind: ValidationErrorKind,
    /// False when the field re-entered the state it was already in
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct FormState {
    catalog: Arc<FieldCatalog>,
    validation: FieldValidationMap,
    values: FieldValueMap,
    lowercase: bool,
    output: Option<String>,
}

impl FormState {
    pub fn new(catalog: Arc<FieldCatalog>) -> Self {
        Self {
            catalog,
            validation: FieldValidationMap::new(),
            values: FieldValueMap::new(),
            lowercase: false,
            output: None,
        }
    }

    /// Validate `raw` for `field`, update the value map and recompose
    pub fn apply(&mut self, field: FieldName, raw: &str) -> FieldUpdate {
        let kind = self.catalog.validate(field, raw);
        let changed = self.transition(field, kind);

        if kind.is_valid() && !raw.is_empty() {
            self.values.insert(field, raw.to_string());
        } else {
            self.values.remove(&field);
        }

        self.recompose();

        FieldUpdate { field, kind, changed }
    }

    fn transition(&mut self, field: FieldName, kind: ValidationErrorKind) -> bool {
        if self.validation.get(&field) == Some(&kind) {
            return false;
        }

        tracing::debug!(field = %field, state = ?kind, "field validation changed");
        self.validation.insert(field, kind);
        true
    }

    /// Apply a value (or the empty string) to every catalog field, as a
    /// full form submission would
    pub fn fill(&mut self, raw: &BTreeMap<FieldName, String>) -> Vec<FieldUpdate> {
        let names: Vec<FieldName> = self.catalog.fields().iter().map(|c| c.name).collect();
        names
            .into_iter()
            .map(|field| self.apply(field, raw.get(&field).map(String::as_str).unwrap_or("")))
            .collect()
    }

    /// Why there is no output; `None` once a link is composed
    pub fn blocked_by(&self) -> Option<NotComposable> {
        if self.output.is_some() {
            return None;
        }

        let pending = self.catalog.required().find(|config| {
            self.validation.get(&config.name) != Some(&ValidationErrorKind::None)
        });
        match pending {
            Some(config) => Some(NotComposable::MissingRequired(config.name)),
            None => compose(&self.catalog, &self.values, self.lowercase).err(),
        }
    }

    /// Every required field has been validated and passed
    pub fn is_composable(&self) -> bool {
        self.catalog
            .required()
            .all(|config| self.validation.get(&config.name) == Some(&ValidationErrorKind::None))
    }

    fn recompose(&mut self) {
        self.output = if self.is_composable() {
            compose(&self.catalog, &self.values, self.lowercase).ok()
        } else {
            None
        };
    }

    pub fn set_lowercase(&mut self, lowercase: bool) {
        if self.lowercase != lowercase {
            self.lowercase = lowercase;
            self.recompose();
        }
    }

    pub fn toggle_lowercase(&mut self) -> bool {
        self.set_lowercase(!self.lowercase);
        self.lowercase
    }

    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    /// Clear every field, the output and the lowercase option
    pub fn reset(&mut self) {
        self.validation.clear();
        self.values.clear();
        self.lowercase = false;
        self.output = None;
    }

    pub fn validation(&self, field: FieldName) -> Option<ValidationErrorKind> {
        self.validation.get(&field).copied()
    }

    pub fn validations(&self) -> &FieldValidationMap {
        &self.validation
    }

    pub fn values(&self) -> &FieldValueMap {
        &self.values
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }
}
