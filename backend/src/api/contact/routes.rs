//! Defines the HTTP routes for contact submissions.
//!
//! The write handler is registered once per entry in `SUBMIT_PATHS` so every
//! alias shares one implementation.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{count_submissions, create_submission, get_submission, list_submissions};
use crate::AppState;

/// Paths the contact form has posted to over time.
pub const SUBMIT_PATHS: &[&str] = &[
    "/users",
    "/api/users",
    "/contact",
    "/api/contact",
    "/send-message",
    "/api/send-message",
];

pub fn contact_router() -> Router<AppState> {
    let router = SUBMIT_PATHS
        .iter()
        .fold(Router::<AppState>::new(), |router, path| {
            router.route(path, post(create_submission))
        });

    router
        .route("/users", get(list_submissions))
        .route("/users/count", get(count_submissions))
        .route("/users/:id", get(get_submission))
}
