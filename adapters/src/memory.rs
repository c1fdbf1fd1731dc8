//! In-process adapter implementation of `SubmissionStore`.
//!
//! Records live in a mutex-guarded vector in insertion order and vanish when
//! the process exits. Used as the zero-configuration storage mode and as the
//! test double for the backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{FindQuery, NewSubmission, SortOrder, Submission};
use crate::SubmissionStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Submission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let record = Submission::from_new(id, submission, Utc::now());
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<Submission>, StoreError> {
        let records = self.records.lock().await;

        // Stable sort keeps insertion order among equal timestamps.
        let mut ordered: Vec<&Submission> = records.iter().collect();
        ordered.sort_by_key(|record| record.created_at);
        if query.sort == SortOrder::Descending {
            ordered.reverse();
        }

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(ordered
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.lock().await.len() as u64)
    }

    async fn count_by_email_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| record.email == email && record.created_at >= since)
            .count() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
