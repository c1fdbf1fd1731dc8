//! Core `adapters` crate for abstracting contact-submission storage.
//!
//! This crate defines the `SubmissionStore` trait, which outlines the generic
//! operations the backend needs from a storage engine, and provides the
//! concrete implementations (in-memory and MongoDB).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod errors;
pub mod memory;
pub mod models;
pub mod mongo;

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use models::{FindQuery, NewSubmission, SortOrder, Submission};
pub use mongo::{MongoConnection, MongoStore};

/// Storage seam for contact submissions.
///
/// Implementations own id and timestamp assignment: `insert` returns the
/// record exactly as it was persisted.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Short name of the backing engine, reported by health checks.
    fn backend(&self) -> &'static str;

    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError>;

    async fn find(&self, query: &FindQuery) -> Result<Vec<Submission>, StoreError>;

    /// Returns `Ok(None)` both for unknown ids and for ids this engine could
    /// never have issued.
    async fn find_by_id(&self, id: &str) -> Result<Option<Submission>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Number of submissions from `email` created at or after `since`.
    async fn count_by_email_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    /// Round-trips to the engine to prove it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
