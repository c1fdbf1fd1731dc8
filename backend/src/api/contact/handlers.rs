//! Handler functions for the contact-submission API.
//!
//! These functions unpack HTTP extractors, delegate to `SubmissionService`,
//! and shape the JSON envelopes the contact form and admin views expect.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use folio_adapters::Submission;
use serde::Serialize;

use crate::database::queries::{ListParams, Pagination};
use crate::errors::AppError;
use crate::services::validation::{SubmissionPayload, ValidationError};
use crate::services::SubmissionService;

pub const SUBMITTED_MESSAGE: &str = "Successfully submitted";

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    #[serde(rename = "_message")]
    pub message: &'static str,
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub data: Submission,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Submission>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub success: bool,
    pub data: Submission,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: u64,
}

pub async fn create_submission(
    State(service): State<SubmissionService>,
    payload: Result<Json<SubmissionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "unreadable submission body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            ValidationError::single("body", rejection.body_text()).into()
        }
    })?;

    let stored = service.create(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            message: SUBMITTED_MESSAGE,
            id: stored.id.clone(),
            timestamp: stored.created_at,
            data: stored,
        }),
    ))
}

pub async fn list_submissions(
    State(service): State<SubmissionService>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError> {
    let Query(params) =
        params.map_err(|rejection| ValidationError::single("query", rejection.body_text()))?;

    let page = service.list(&params).await?;
    Ok(Json(ListResponse {
        success: true,
        data: page.data,
        pagination: page.pagination,
    }))
}

pub async fn get_submission(
    State(service): State<SubmissionService>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, AppError> {
    let data = service.get(&id).await?;
    Ok(Json(ItemResponse {
        success: true,
        data,
    }))
}

pub async fn count_submissions(
    State(service): State<SubmissionService>,
) -> Result<Json<CountResponse>, AppError> {
    let count = service.count().await?;
    Ok(Json(CountResponse {
        success: true,
        count,
    }))
}
