//! Generic data models for the `adapters` crate.
//!
//! These models are the engine-neutral representation of a contact
//! submission, shared by every `SubmissionStore` implementation and by the
//! backend's API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated submission that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub fullname: String,
    pub email: String,
    pub address: String,
    pub message: String,
}

/// A persisted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub address: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn from_new(id: String, new: NewSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id,
            fullname: new.fullname,
            email: new.email,
            address: new.address,
            message: new.message,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ordering on creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Accepts `asc`/`desc` as well as the `createdAt`/`-createdAt` field form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "asc" | "ascending" | "createdAt" | "+createdAt" => Some(Self::Ascending),
            "desc" | "descending" | "-createdAt" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Offset/limit window over all submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindQuery {
    pub skip: u64,
    pub limit: u64,
    pub sort: SortOrder,
}

impl Default for FindQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 10,
            sort: SortOrder::Descending,
        }
    }
}
