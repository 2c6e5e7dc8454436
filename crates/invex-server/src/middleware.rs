//! Middleware for the HTTP API.

use std::time::Instant;

use axum::{
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Permissive CORS so browser front ends can post documents directly.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Log one line per request with the declared upload size.
///
/// Rejected and failed requests are logged at `WARN`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let upload_bytes = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;
    if status.is_client_error() || status.is_server_error() {
        warn!(%method, %path, upload_bytes, status = status.as_u16(), duration_ms, "Request rejected");
    } else {
        info!(%method, %path, upload_bytes, status = status.as_u16(), duration_ms, "Request completed");
    }

    response
}
