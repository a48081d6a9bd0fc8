//! Shared types for the request handling layer.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// API context: shared state for every route
// ═══════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Views: named payloads standing in for rendered pages
// ═══════════════════════════════════════════════════════════

/// A rendered view: the page name plus whatever data the page shows.
/// Serialized as `{"view": "...", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct View<T: Serialize> {
    pub view: &'static str,
    pub data: Option<T>,
}

impl<T: Serialize> View<T> {
    pub fn with_data(view: &'static str, data: T) -> Self {
        Self {
            view,
            data: Some(data),
        }
    }
}

impl View<()> {
    /// A static page with no data.
    pub fn page(view: &'static str) -> Self {
        Self { view, data: None }
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

// ═══════════════════════════════════════════════════════════
// Redirects
// ═══════════════════════════════════════════════════════════

/// `302 Found` to `location`.
pub fn found(location: &str) -> Result<Response, ApiError> {
    let value = HeaderValue::from_str(location)
        .map_err(|e| ApiError::Internal(format!("invalid redirect target {location:?}: {e}")))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}

/// Redirect into an id-keyed route such as `/patient-home/<id>`.
pub fn found_at(prefix: &str, id: &str) -> Result<Response, ApiError> {
    found(&format!("{prefix}/{}", encode_path_segment(id)))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Parse an id taken from a path or query. A malformed id can never match a
/// record, so it fails the same way a missing record does.
pub fn parse_id(entity: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::Internal(format!("invalid {entity} id {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn page_serializes_null_data() {
        let response = View::page("login").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["view"], "login");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn view_with_data() {
        let response = View::with_data("doctor-home", serde_json::json!({"n": 1})).into_response();
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["n"], 1);
    }

    #[test]
    fn found_sets_location() {
        let response = found("/patient-home/abc").unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/patient-home/abc"
        );
    }

    #[test]
    fn found_at_encodes_the_id() {
        let response = found_at("/patient-details", "a b/\n").unwrap();
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/patient-details/a%20b%2F%0A"
        );
    }

    #[test]
    fn uuid_segments_pass_through() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(encode_path_segment(&id), id);
    }

    #[test]
    fn malformed_id_is_internal() {
        assert!(matches!(parse_id("patient", "nope"), Err(ApiError::Internal(_))));
    }
}
