//! Module for the contact-submission API.
//!
//! One logical write route, bound under several historical paths, plus the
//! read-only listing, lookup, and count endpoints.

pub mod handlers;
pub mod routes;
