//! Route definitions for the HTTP API.

mod extract;
mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .route("/extract", post(extract::extract_invoice))
        .with_state(state)
}

pub use extract::*;
pub use health::*;
