//! Access logging middleware.
//!
//! Logs every request with method, path, response status and latency.
//! Bodies and query strings are never logged: they carry credentials and
//! patient data.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

pub async fn log_access(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = whole_millis(started.elapsed());
    if response.status().is_server_error() {
        tracing::warn!(%method, path, status, latency_ms, "request failed");
    } else {
        tracing::info!(%method, path, status, latency_ms, "request served");
    }

    response
}

/// Saturates instead of truncating the `u128` millisecond count.
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
