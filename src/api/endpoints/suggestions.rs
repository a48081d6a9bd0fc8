use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::QueryParams;
use crate::api::types::{parse_id, ApiContext};
use crate::db;

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    #[serde(
        rename = "patientId",
        default,
        deserialize_with = "crate::models::form::text"
    )]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::form::text")]
    pub suggestion: Option<String>,
}

/// `POST /submit-suggestion?patientId=..&suggestion=..`
///
/// The patient id is not checked against the store.
pub async fn submit(
    State(ctx): State<ApiContext>,
    QueryParams(params): QueryParams<SuggestionParams>,
) -> Result<StatusCode, ApiError> {
    let raw = params
        .patient_id
        .as_deref()
        .ok_or_else(|| ApiError::Internal("submit-suggestion without patientId".into()))?;
    let patient_id = parse_id("patient", raw)?;

    let stored = {
        let conn = ctx.core.lock_db()?;
        db::insert_suggestion(&conn, &patient_id, params.suggestion.as_deref())?
    };

    tracing::info!(id = %stored.id, %patient_id, "Suggestion submitted");
    Ok(StatusCode::NO_CONTENT)
}
