//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while connecting to, writing to,
//! or reading from a storage engine, giving the backend a single error type
//! regardless of which adapter is in use.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
