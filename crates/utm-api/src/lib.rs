//! UTM API /v1: REST endpoints over the link builder core
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::ApiError;
pub use state::{AppState, SharedState};

pub fn create_app(state: SharedState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/fields", get(handlers::fields))
        .route("/v1/validate", post(handlers::validate))
        .route("/v1/compose", post(handlers::compose))
        .route("/v1/hints/commit", post(handlers::commit_hints))
        .route(
            "/v1/hints/{field}",
            get(handlers::hints).delete(handlers::remove_hint),
        )
        .route(
            "/v1/language",
            get(handlers::get_language).put(handlers::set_language),
        )
        .route("/v1/translations", post(handlers::translations))
        .route("/metrics", get(handlers::metrics))
        .layer(from_fn(middleware::request_id))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> Result<(), ApiError> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    tracing::info!("UTM API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
