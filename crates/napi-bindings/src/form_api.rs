//! NAPI bindings for validation and composition

use napi::bindgen_prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use utm_core::{FieldCatalog, FieldName, FormState};

use crate::to_napi;

/// Outcome of composing a link from raw form values
#[napi(object)]
pub struct ComposeResult {
    pub url: Option<String>,
    pub reason: Option<String>,
    /// Field name to `none` / `empty` / `pattern`, as JSON
    pub validation_json: String,
}

/// Static field description for building the form
#[napi(object)]
pub struct FieldPattern {
    pub name: String,
    pub required: bool,
    pub pattern: String,
    pub param: Option<String>,
    pub hints: Vec<String>,
}

/// Compose a tracked URL from a JSON object of raw values keyed by field
#[napi]
pub fn compose_url(values_json: String, lowercase: Option<bool>) -> Result<ComposeResult> {
    let values: BTreeMap<FieldName, String> = serde_json::from_str(&values_json).map_err(to_napi)?;

    let mut form = FormState::new(Arc::new(FieldCatalog::builtin()));
    form.fill(&values);
    form.set_lowercase(lowercase.unwrap_or(false));

    Ok(ComposeResult {
        url: form.output().map(str::to_string),
        reason: form.blocked_by().map(|r| r.to_string()),
        validation_json: serde_json::to_string(form.validations()).map_err(to_napi)?,
    })
}

/// Validate one value; returns `none`, `empty` or `pattern`
#[napi]
pub fn validate_field(field: String, value: String) -> Result<String> {
    let field: FieldName = field.parse().map_err(to_napi)?;
    let kind = FieldCatalog::builtin().validate(field, &value);
    serde_json::to_value(kind)
        .map_err(to_napi)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::from_reason("unexpected validation encoding"))
}

#[napi]
pub fn field_patterns() -> Vec<FieldPattern> {
    FieldCatalog::builtin()
        .fields()
        .iter()
        .map(|config| FieldPattern {
            name: config.name.to_string(),
            required: config.required,
            pattern: config.rule().pattern_source().to_string(),
            param: config.name.param_key(),
            hints: config.default_hints.clone(),
        })
        .collect()
}
