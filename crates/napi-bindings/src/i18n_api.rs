//! NAPI bindings for the partial translation resolver

use napi::bindgen_prelude::*;
use utm_i18n::{resolve, Language, PrunePolicy, SelectionMask, TranslationTree};

use crate::to_napi;

/// Resolve a JSON selection mask against a language's labels, returning
/// the partial tree as JSON
#[napi]
pub fn resolve_translation(language: String, mask_json: String, keep_empty: Option<bool>) -> Result<String> {
    let language: Language = language.parse().map_err(to_napi)?;
    let tree = TranslationTree::load(language).map_err(to_napi)?;

    let mask_value: serde_json::Value = serde_json::from_str(&mask_json).map_err(to_napi)?;
    let mask = SelectionMask::from_value(mask_value).map_err(to_napi)?;

    let policy = if keep_empty.unwrap_or(false) {
        PrunePolicy::KeepEmpty
    } else {
        PrunePolicy::PruneEmpty
    };

    serde_json::to_string(&resolve(&mask, &tree, policy)).map_err(to_napi)
}
