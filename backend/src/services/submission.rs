//! Validates, persists, and reads back contact submissions.
//!
//! `SubmissionService` is the only component that talks to the store. Each
//! operation is a single validate-then-write or validate-then-read; there is
//! no multi-step workflow and no shared mutable state beyond the store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use folio_adapters::{Submission, SubmissionStore};
use serde::Serialize;

use crate::database::queries::{ListParams, PageRequest, Pagination};
use crate::errors::AppError;
use crate::services::validation::{self, SubmissionPayload};

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Storage reachability and size, as reported by the health endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealth {
    pub backend: &'static str,
    pub connected: bool,
    pub total: Option<u64>,
}

#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
    duplicate_window: Option<Duration>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            store,
            duplicate_window: None,
        }
    }

    pub fn with_duplicate_window(mut self, window: Option<Duration>) -> Self {
        self.duplicate_window = window;
        self
    }

    pub async fn create(&self, payload: &SubmissionPayload) -> Result<Submission, AppError> {
        let submission = validation::validate(payload).map_err(|err| {
            tracing::warn!(field = ?err.field(), reason = %err.message(), "rejected submission");
            AppError::from(err)
        })?;

        if let Some(window) = self.duplicate_window {
            let recent = self
                .store
                .count_by_email_since(&submission.email, Utc::now() - window)
                .await?;
            if recent > 0 {
                tracing::warn!(email = %submission.email, "duplicate submission inside window");
                return Err(AppError::DuplicateKey(format!(
                    "a message from {} was already received in the last {} hours",
                    submission.email,
                    window.num_hours()
                )));
            }
        }

        let stored = self.store.insert(submission).await?;
        tracing::info!(id = %stored.id, email = %stored.email, "submission stored");
        Ok(stored)
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Submission>, AppError> {
        let request = PageRequest::from_params(params)?;
        let data = self.store.find(&request.find_query()).await?;
        let total = self.store.count().await?;

        Ok(Page {
            data,
            pagination: request.pagination(total),
        })
    }

    pub async fn get(&self, id: &str) -> Result<Submission, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("submission {id} not found")))
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.store.count().await?)
    }

    /// Never fails: an unreachable store is reported, not propagated.
    pub async fn health(&self) -> StorageHealth {
        let backend = self.store.backend();
        if let Err(err) = self.store.ping().await {
            tracing::warn!(error = %err, "storage ping failed");
            return StorageHealth {
                backend,
                connected: false,
                total: None,
            };
        }

        let total = match self.store.count().await {
            Ok(total) => Some(total),
            Err(err) => {
                tracing::warn!(error = %err, "storage count failed");
                None
            }
        };
        StorageHealth {
            backend,
            connected: true,
            total,
        }
    }
}
