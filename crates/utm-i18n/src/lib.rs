//! UTM i18n: label trees, the partial translation resolver and the
//! observable language store.
//!
//! # Example
//!
//! ```
//! use utm_i18n::{resolve, Language, PrunePolicy, SelectionMask, TranslationTree};
//!
//! let tree = TranslationTree::load(Language::En).unwrap();
//! let mask = SelectionMask::new().select("generatorForm.error.empty");
//!
//! let partial = resolve(&mask, &tree, PrunePolicy::PruneEmpty);
//! assert_eq!(
//!     serde_json::Value::Object(partial),
//!     serde_json::json!({"generatorForm": {"error": {"empty": "cannot be empty"}}})
//! );
//! ```

pub mod error;
pub mod language;
pub mod resolver;
pub mod tree;

pub use error::I18nError;
pub use language::{LanguageStore, Subscription, LANGUAGE_KEY};
pub use resolver::{resolve, PartialTranslationTree, PrunePolicy};
pub use tree::{lookup, Language, SelectionMask, TranslationTree};
