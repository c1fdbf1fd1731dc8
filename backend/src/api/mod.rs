//! Central module for organizing the application's API endpoints.
//!
//! This module acts as a top-level container for the contact-submission
//! routes and the operational (health) routes.

pub mod contact;
pub mod health;
