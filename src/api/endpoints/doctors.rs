use axum::extract::State;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::extract::PathParam;
use crate::api::types::{parse_id, ApiContext, View};
use crate::db;
use crate::models::{Account, AccountRole, Patient};

#[derive(Debug, Serialize)]
pub struct DoctorHome {
    pub doctor: Account,
    pub patients: Vec<Patient>,
}

/// `GET /doctor-home/:id`: the doctor plus every patient on record.
pub async fn home(
    State(ctx): State<ApiContext>,
    PathParam(id): PathParam<String>,
) -> Result<View<DoctorHome>, ApiError> {
    let doctor_id = parse_id("doctor", &id)?;
    let conn = ctx.core.lock_db()?;
    let doctor = db::get_account(&conn, AccountRole::Doctor, &doctor_id)?;
    let patients = db::list_patients(&conn)?;

    Ok(View::with_data("doctor-home", DoctorHome { doctor, patients }))
}
