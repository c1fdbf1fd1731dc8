//! Defines the HTTP routes for the operational endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{health, hello, root_handler};
use crate::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/hello", get(hello))
        .route("/health", get(health))
        .route("/api/health", get(health))
}
