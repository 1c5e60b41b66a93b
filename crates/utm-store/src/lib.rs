//! UTM Store: the single-value key/value persistence primitive.
//!
//! The builder keeps two logical keys, `translation-language` and
//! `hintsHistory`. Both go through [`KeyValueStore`], so the core logic can
//! run against [`MemoryStore`] in tests and [`FileStore`] in the service.

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::{KeyValueStore, SetOptions, SharedStore, StoredEntry, StoredValue};
pub use memory::MemoryStore;
