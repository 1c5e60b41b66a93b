//! API handlers
use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utm_core::{FieldName, FieldValueMap, FormState};
use utm_hints::highlight;
use utm_i18n::{Language, PrunePolicy, SelectionMask};

use crate::error::ApiError;
use crate::state::SharedState;

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "time": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

pub async fn fields(State(state): State<SharedState>) -> Json<Value> {
    let fields: Vec<Value> = state
        .catalog
        .fields()
        .iter()
        .map(|config| {
            json!({
                "name": config.name,
                "required": config.required,
                "hints": config.default_hints,
                "param": config.name.param_key(),
                "pattern": config.rule().pattern_source(),
            })
        })
        .collect();

    Json(json!({ "fields": fields }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub field: FieldName,
    #[serde(default)]
    pub value: String,
}

pub async fn validate(
    State(state): State<SharedState>,
    Json(payload): Json<ValidateRequest>,
) -> Json<Value> {
    let kind = state.catalog.validate(payload.field, &payload.value);

    if let Some(key) = kind.message_key() {
        state
            .metrics
            .validation_failures
            .with_label_values(&[payload.field.as_str(), key])
            .inc();
    }

    Json(json!({ "field": payload.field, "error": kind }))
}

#[derive(Debug, Deserialize)]
pub struct ComposeRequest {
    #[serde(default)]
    pub values: BTreeMap<FieldName, String>,
    #[serde(default)]
    pub lowercase: bool,
}

/// Run the raw values through the form state machine and compose.
/// Answers 422 with a reason while the form is incomplete.
pub async fn compose(
    State(state): State<SharedState>,
    Json(payload): Json<ComposeRequest>,
) -> (StatusCode, Json<Value>) {
    let mut form = FormState::new(state.catalog.clone());
    form.fill(&payload.values);
    form.set_lowercase(payload.lowercase);

    match form.blocked_by() {
        None => {
            let url = form.output().unwrap_or_default();
            state.metrics.compositions.inc();
            (StatusCode::OK, Json(json!({ "url": url, "validation": form.validations() })))
        }
        Some(reason) => {
            state.metrics.compose_rejections.inc();
            tracing::debug!(reason = %reason, "not composable");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "reason": reason.to_string(), "validation": form.validations() })),
            )
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HintQuery {
    #[serde(default)]
    pub prefix: String,
}

pub async fn hints(
    State(state): State<SharedState>,
    Path(field): Path<FieldName>,
    Query(query): Query<HintQuery>,
) -> Json<Value> {
    let suggestions = state.hints().suggestions_matching(field, &query.prefix);

    let hints: Vec<Value> = suggestions
        .iter()
        .map(|hint| {
            let parts = highlight(&hint.value, &query.prefix);
            json!({
                "value": hint.value,
                "removable": hint.removable,
                "matched": parts.matched,
                "rest": parts.rest,
            })
        })
        .collect();

    Json(json!({ "field": field, "hints": hints }))
}

#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub values: BTreeMap<FieldName, String>,
}

/// Remember the submitted values; ones failing validation are ignored
pub async fn commit_hints(
    State(state): State<SharedState>,
    Json(payload): Json<CommitRequest>,
) -> Result<Json<Value>, ApiError> {
    let values: FieldValueMap = payload
        .values
        .into_iter()
        .filter(|(field, value)| state.catalog.validate(*field, value).is_valid())
        .collect();

    let added = state.hints().commit(&values)?;
    state.metrics.hint_commits.inc();

    Ok(Json(json!({ "added": added })))
}

#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub value: String,
}

pub async fn remove_hint(
    State(state): State<SharedState>,
    Path(field): Path<FieldName>,
    Json(payload): Json<RemoveRequest>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.hints().remove(field, &payload.value)?;
    Ok(Json(json!({ "field": field, "removed": removed })))
}

pub async fn get_language(State(state): State<SharedState>) -> Json<Value> {
    let language = state.language().language();
    Json(json!({ "language": language, "available": Language::ALL }))
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

pub async fn set_language(
    State(state): State<SharedState>,
    Json(payload): Json<LanguageRequest>,
) -> Result<Json<Value>, ApiError> {
    let language: Language = payload.language.parse()?;
    state.language().set_language(language)?;
    Ok(Json(json!({ "language": language })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub mask: Value,
    #[serde(default)]
    pub keep_empty: bool,
}

pub async fn translations(
    State(state): State<SharedState>,
    Json(payload): Json<TranslationRequest>,
) -> Result<Json<Value>, ApiError> {
    let mask = SelectionMask::from_value(payload.mask)?;
    let policy = if payload.keep_empty {
        PrunePolicy::KeepEmpty
    } else {
        PrunePolicy::PruneEmpty
    };

    let language = state.language();
    let partial = language.partial(&mask, policy);
    Ok(Json(json!({ "language": language.language(), "labels": partial })))
}

pub async fn metrics(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
