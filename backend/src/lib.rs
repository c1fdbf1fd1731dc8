//! Library root for the portfolio contact backend.
//!
//! Exposes the router builder and shared state so the binary and the HTTP
//! tests assemble the exact same application.

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, FromRef};
use axum::Router;
use folio_adapters::SubmissionStore;

use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use crate::services::SubmissionService;

#[derive(Clone)]
pub struct AppState {
    pub submissions: SubmissionService,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            submissions: SubmissionService::new(store),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn from_config(store: Arc<dyn SubmissionStore>, config: &Config) -> Self {
        Self {
            submissions: SubmissionService::new(store)
                .with_duplicate_window(config.duplicate_window),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl FromRef<AppState> for SubmissionService {
    fn from_ref(state: &AppState) -> Self {
        state.submissions.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .merge(api::health::routes::health_router())
        .merge(api::contact::routes::contact_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(state)
}
