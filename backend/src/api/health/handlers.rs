//! Handler functions for the operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::services::SubmissionService;

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub backend: &'static str,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmissionTotals {
    pub total: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub database: DatabaseStatus,
    pub submissions: SubmissionTotals,
    pub timestamp: DateTime<Utc>,
}

pub async fn root_handler() -> &'static str {
    "Welcome to the portfolio contact API!"
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "msg": "Backend API is running!" }))
}

/// 200 while storage answers a ping, 503 otherwise.
pub async fn health(
    State(service): State<SubmissionService>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = service.health().await;
    let status = if storage.connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        success: storage.connected,
        status: if storage.connected { "OK" } else { "DEGRADED" },
        database: DatabaseStatus {
            backend: storage.backend,
            connected: storage.connected,
        },
        submissions: SubmissionTotals {
            total: storage.total,
        },
        timestamp: Utc::now(),
    };
    (status, Json(body))
}
