//! The key/value persistence primitive.
//!
//! Values are stored as strings. Reads try to parse them as JSON and fall
//! back to the raw string, so both JSON and plain values round-trip.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;

/// A value read back from the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// The stored string parsed as JSON
    Json(Value),
    /// The stored string was not JSON
    Raw(String),
}

impl StoredValue {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => StoredValue::Json(value),
            Err(_) => StoredValue::Raw(raw.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            StoredValue::Json(value) => Some(value),
            StoredValue::Raw(_) => None,
        }
    }

    /// JSON view; raw strings become JSON strings
    pub fn into_json(self) -> Value {
        match self {
            StoredValue::Json(value) => value,
            StoredValue::Raw(raw) => Value::String(raw),
        }
    }
}

/// Cookie-style attributes attached to a write. Opaque to callers of the
/// core; backends keep them alongside the value and honor `expires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    #[serde(default)]
    pub secure: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            domain: None,
            path: Some("/".to_string()),
            expires: None,
            same_site: None,
            secure: false,
        }
    }
}

impl SetOptions {
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn expires_in(self, ttl: Duration) -> Self {
        self.expires_at(Utc::now() + ttl)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(false, |at| at <= now)
    }
}

/// A stored value with the options it was written with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    #[serde(default)]
    pub options: SetOptions,
}

impl StoredEntry {
    /// The value, unless the entry has expired
    pub fn live_value(&self) -> Option<&str> {
        if self.options.is_expired(Utc::now()) {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// Get/set by name, JSON or raw string
pub trait KeyValueStore: Send {
    /// Raw stored string, `None` when absent or expired
    fn get_raw(&self, name: &str) -> Option<String>;

    fn set_raw(&mut self, name: &str, raw: String, options: &SetOptions) -> Result<(), StoreError>;

    fn remove(&mut self, name: &str) -> Result<(), StoreError>;

    fn get(&self, name: &str) -> Option<StoredValue> {
        self.get_raw(name).map(|raw| StoredValue::parse(&raw))
    }

    /// Store `value` serialized as JSON
    fn set(&mut self, name: &str, value: &Value, options: &SetOptions) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(name, raw, options)
    }
}

/// A store shared by several owners (hint repository, language store).
/// Access is serialized through a mutex.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Box<dyn KeyValueStore>>>,
}

impl SharedStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}

impl KeyValueStore for SharedStore {
    fn get_raw(&self, name: &str) -> Option<String> {
        self.lock().get_raw(name)
    }

    fn set_raw(&mut self, name: &str, raw: String, options: &SetOptions) -> Result<(), StoreError> {
        self.lock().set_raw(name, raw, options)
    }

    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        self.lock().remove(name)
    }
}
