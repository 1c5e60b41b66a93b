//! API errors and their HTTP mapping
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use utm_core::UtmError;
use utm_i18n::I18nError;
use utm_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] UtmError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error("METRICS/{0}")]
    Metrics(#[from] prometheus::Error),

    #[error("API/io: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(UtmError::UnknownField(_)) => StatusCode::BAD_REQUEST,
            ApiError::I18n(I18nError::UnknownLanguage(_) | I18nError::MalformedMask(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
