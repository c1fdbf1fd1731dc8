//! Module for core business logic services.
//!
//! This module encapsulates the submission service and the field rules it
//! enforces, keeping HTTP concerns out of both.

pub mod submission;
pub mod validation;

pub use submission::{Page, StorageHealth, SubmissionService};
