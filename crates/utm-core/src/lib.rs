//! UTM Core: field catalog, validation state machine and URL composition.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use utm_core::{FieldCatalog, FieldName, FormState};
//!
//! let mut form = FormState::new(Arc::new(FieldCatalog::builtin()));
//! form.apply(FieldName::Url, "example.com");
//! form.apply(FieldName::Campaign, "sale");
//! form.apply(FieldName::Source, "google.pl");
//! form.apply(FieldName::Medium, "cpc");
//!
//! assert_eq!(
//!     form.output(),
//!     Some("http://example.com?utm_campaign=sale&utm_source=google.pl&utm_medium=cpc"),
//! );
//! ```

pub mod compose;
pub mod error;
pub mod field;
pub mod form;
pub mod validation;

pub use compose::{compose, FieldValueMap, NotComposable};
pub use error::UtmError;
pub use field::{FieldCatalog, FieldConfig, FieldName};
pub use form::{FieldUpdate, FieldValidationMap, FormState};
pub use validation::{validate, FieldRule, ValidationErrorKind};

/// Version of the core engine
pub const UTM_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
