//! Request middleware: permissive CORS and per-request ids.
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::{body::Body, response::Response};
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Tag the request with a fresh v4 id, log it and echo it back
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let id = Uuid::new_v4();
    let span = tracing::info_span!("request", id = %id, method = %req.method(), path = %req.uri().path());

    let mut response = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| tracing::info!(status = response.status().as_u16(), "handled"));

    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}
