//! Module for storage connection setup and common utilities.
//!
//! This module is responsible for turning the configured storage backend into
//! a ready `SubmissionStore`, and for the listing query helpers in `queries`.

pub mod queries;

use std::sync::Arc;

use folio_adapters::{MemoryStore, MongoStore, StoreError, SubmissionStore};

use crate::config::StorageConfig;

/// Opens the configured store. For MongoDB this includes a ping, so an
/// unreachable server fails here rather than on the first request.
pub async fn connect(storage: &StorageConfig) -> Result<Arc<dyn SubmissionStore>, StoreError> {
    match storage {
        StorageConfig::Memory => {
            tracing::warn!("using in-memory storage; submissions are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageConfig::Mongo(settings) => {
            let store = MongoStore::new(settings.clone().into()).await?;
            Ok(Arc::new(store))
        }
    }
}
