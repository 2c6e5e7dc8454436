//! invex-server - HTTP API for invoice field extraction.
//!
//! # Example
//!
//! ```ignore
//! use invex_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = create_server(AppState::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{Router, extract::DefaultBodyLimit, middleware as axum_middleware};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    routes::create_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
