//! Extractors whose rejections fail as `ApiError` instead of axum's 400s.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// Decodes `application/json` bodies as JSON and everything else as an
/// urlencoded form. Undecodable bodies fail as internal errors.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Internal(format!("undecodable JSON body: {}", e.body_text())))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Internal(format!("undecodable form body: {}", e.body_text())))?;
            Ok(Self(value))
        }
    }
}

/// `Query` with an internal-error rejection.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Internal(format!("undecodable query string: {}", e.body_text())))?;
        Ok(Self(value))
    }
}

/// `Path` with an internal-error rejection.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Internal(format!("undecodable path: {}", e.body_text())))?;
        Ok(Self(value))
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Method;
    use crate::models::NewPatient;

    fn post(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().method(Method::POST).uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn decodes_urlencoded_form() {
        let req = post(
            Some("application/x-www-form-urlencoded"),
            "name=Jane&password=x&age=30",
        );
        let FormOrJson(p) = FormOrJson::<NewPatient>::from_request(req, &()).await.unwrap();
        assert_eq!(p.name.as_deref(), Some("Jane"));
        assert_eq!(p.age.as_deref(), Some("30"));
        assert!(p.gender.is_none());
    }

    #[tokio::test]
    async fn decodes_json_with_numeric_age() {
        let req = post(
            Some("application/json; charset=utf-8"),
            r#"{"name":"Jane","password":"x","age":30,"gender":"F"}"#,
        );
        let FormOrJson(p) = FormOrJson::<NewPatient>::from_request(req, &()).await.unwrap();
        assert_eq!(p.age.as_deref(), Some("30"));
        assert_eq!(p.gender.as_deref(), Some("F"));
    }

    #[tokio::test]
    async fn duplicate_query_key_is_internal_error() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/?value1=a&value1=b")
            .body(())
            .unwrap()
            .into_parts();
        let result =
            QueryParams::<crate::models::MeasurementValues>::from_request_parts(&mut parts, &())
                .await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[tokio::test]
    async fn malformed_json_is_internal_error() {
        let req = post(Some("application/json"), "{not json");
        let result = FormOrJson::<NewPatient>::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }
}
