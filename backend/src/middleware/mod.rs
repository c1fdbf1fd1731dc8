//! General-purpose middleware for the API.
//!
//! Every request gets an `x-request-id` (taken from the caller when present,
//! generated otherwise) that is echoed on the response and attached to the
//! access log line.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("req-{}", Uuid::new_v4().simple()))
}

pub async fn trace_requests(request: Request, next: Next) -> Response {
    let request_id = request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(
            %request_id, %method, %path, status = status.as_u16(), latency_ms,
            "request failed"
        );
    } else {
        tracing::info!(
            %request_id, %method, %path, status = status.as_u16(), latency_ms,
            "request handled"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
