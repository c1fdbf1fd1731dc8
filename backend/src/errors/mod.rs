//! Global application error types and handlers.
//!
//! This module defines the error taxonomy shared by every handler and the
//! single place where each error kind is mapped to an HTTP status and JSON
//! error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_adapters::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::services::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {}", .0.message())]
    ValidationFailed(ValidationError),
    #[error("duplicate submission: {0}")]
    DuplicateKey(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) | AppError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationFailed(_) => "ValidationFailed",
            AppError::DuplicateKey(_) => "DuplicateKey",
            AppError::StorageUnavailable(_) => "StorageUnavailable",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::ValidationFailed(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(message) => AppError::DuplicateKey(message),
            other => AppError::StorageUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::ValidationFailed(err) => json!({
                "success": false,
                "kind": self.kind(),
                "error": err.message(),
                "details": err.details(),
            }),
            AppError::DuplicateKey(message)
            | AppError::NotFound(message)
            | AppError::PayloadTooLarge(message) => json!({
                "success": false,
                "kind": self.kind(),
                "error": message,
            }),
            AppError::StorageUnavailable(detail) => {
                tracing::error!(error = %detail, "storage operation failed");
                json!({
                    "success": false,
                    "kind": self.kind(),
                    "_message": "Failed submission",
                    "error": "Internal server error",
                })
            }
        };
        (status, Json(body)).into_response()
    }
}
