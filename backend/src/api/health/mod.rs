//! Module for operational endpoints.
//!
//! Liveness banners and the storage-aware health probe used by deployments.

pub mod handlers;
pub mod routes;
