//! UTM Hints: per-field suggestion lists with bounded, deduplicated,
//! persisted history.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use utm_core::{FieldCatalog, FieldName, FieldValueMap};
//! use utm_hints::{HintStore, KvHintsRepository};
//! use utm_store::MemoryStore;
//!
//! let catalog = Arc::new(FieldCatalog::builtin());
//! let mut hints = HintStore::open(catalog, KvHintsRepository::new(MemoryStore::new()));
//!
//! let values: FieldValueMap = [(FieldName::Source, "bing.com".to_string())].into_iter().collect();
//! hints.commit(&values).unwrap();
//!
//! let last = hints.suggestions(FieldName::Source).pop().unwrap();
//! assert_eq!(last.value, "bing.com");
//! assert!(last.removable);
//! ```

pub mod history;
pub mod repository;
pub mod store;
pub mod suggestion;

pub use history::{HintsHistory, HISTORY_CAPACITY};
pub use repository::{HintsRepository, InMemoryHintsRepository, KvHintsRepository, HISTORY_KEY};
pub use store::HintStore;
pub use suggestion::{filter_by_prefix, highlight, HintConfig, HintHighlight};
