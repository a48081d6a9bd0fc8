//! Patient-facing views and the find-patient redirect.

use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::extract::{FormOrJson, PathParam, QueryParams};
use crate::api::types::{found_at, parse_id, ApiContext, View};
use crate::db;
use crate::models::{Patient, PatientData, Suggestion};

#[derive(Debug, Serialize)]
pub struct PatientHome {
    pub patient: Patient,
    pub suggestions: Vec<Suggestion>,
    pub patient_data: Option<PatientData>,
}

#[derive(Debug, Serialize)]
pub struct PatientDetails {
    pub patient: Patient,
    pub patient_data: Option<PatientData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PatientLookup {
    #[serde(
        rename = "patientId",
        default,
        deserialize_with = "crate::models::form::text"
    )]
    pub patient_id: Option<String>,
}

/// `GET /patient-home/:id`
pub async fn home(
    State(ctx): State<ApiContext>,
    PathParam(id): PathParam<String>,
) -> Result<View<PatientHome>, ApiError> {
    let patient_id = parse_id("patient", &id)?;
    let conn = ctx.core.lock_db()?;
    let patient = db::get_patient(&conn, &patient_id)?;
    let suggestions = db::list_suggestions_for_patient(&conn, &patient_id)?;
    let patient_data = db::get_patient_data(&conn, &patient_id)?;

    Ok(View::with_data(
        "patient-home",
        PatientHome {
            patient,
            suggestions,
            patient_data,
        },
    ))
}

/// `GET /patient-details/:id`
pub async fn details(
    State(ctx): State<ApiContext>,
    PathParam(id): PathParam<String>,
) -> Result<View<PatientDetails>, ApiError> {
    let patient_id = parse_id("patient", &id)?;
    let conn = ctx.core.lock_db()?;
    let patient = db::get_patient(&conn, &patient_id)?;
    let patient_data = db::get_patient_data(&conn, &patient_id)?;

    Ok(View::with_data(
        "patient-details",
        PatientDetails {
            patient,
            patient_data,
        },
    ))
}

/// `GET /find-patient-details?patientId=...`
pub async fn find_by_query(QueryParams(lookup): QueryParams<PatientLookup>) -> Result<Response, ApiError> {
    redirect_to_details(lookup)
}

/// `POST /find-patient-details` with `patientId` in the body.
pub async fn find_by_form(
    FormOrJson(lookup): FormOrJson<PatientLookup>,
) -> Result<Response, ApiError> {
    redirect_to_details(lookup)
}

/// The id is not checked against the store; the details view reports a
/// missing patient.
fn redirect_to_details(lookup: PatientLookup) -> Result<Response, ApiError> {
    let id = lookup
        .patient_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Internal("find-patient-details without patientId".into()))?;
    found_at("/patient-details", &id)
}
