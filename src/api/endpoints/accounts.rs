//! Signup and login for admins, doctors and patients.

use axum::extract::State;
use axum::response::Response;
use subtle::ConstantTimeEq;

use super::doctors::DoctorHome;
use super::patients::PatientHome;
use crate::api::error::ApiError;
use crate::api::extract::FormOrJson;
use crate::api::types::{found_at, ApiContext, View};
use crate::db;
use crate::models::{AccountRole, NewAccount, NewPatient};

pub const ADMIN_SIGNUP_FAILED: &str = "Error signing up and creating admin";
pub const DOCTOR_SIGNUP_FAILED: &str = "Error signing up and creating doctor";
pub const PATIENT_SIGNUP_FAILED: &str = "Error signing up and creating patient";
pub const PATIENT_REGISTER_FAILED: &str = "Error registering patient";

// ═══════════════════════════════════════════════════════════
// Signup
// ═══════════════════════════════════════════════════════════

/// `POST /signup`
pub async fn admin_signup(
    State(ctx): State<ApiContext>,
    FormOrJson(new): FormOrJson<NewAccount>,
) -> Result<View<()>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let admin = db::insert_account(&conn, AccountRole::Admin, &new)
        .map_err(|e| ApiError::persistence(ADMIN_SIGNUP_FAILED, e))?;

    tracing::info!(id = %admin.id, "Admin signed up");
    Ok(View::page("home"))
}

/// `POST /doctor-signup`: lands the new doctor on their home view.
pub async fn doctor_signup(
    State(ctx): State<ApiContext>,
    FormOrJson(new): FormOrJson<NewAccount>,
) -> Result<View<DoctorHome>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let doctor = db::insert_account(&conn, AccountRole::Doctor, &new)
        .map_err(|e| ApiError::persistence(DOCTOR_SIGNUP_FAILED, e))?;
    let patients = db::list_patients(&conn)?;

    tracing::info!(id = %doctor.id, "Doctor signed up");
    Ok(View::with_data("doctor-home", DoctorHome { doctor, patients }))
}

/// `POST /patient-signup`
pub async fn patient_signup(
    State(ctx): State<ApiContext>,
    FormOrJson(new): FormOrJson<NewPatient>,
) -> Result<Response, ApiError> {
    let patient = {
        let conn = ctx.core.lock_db()?;
        db::insert_patient(&conn, &new).map_err(|e| ApiError::persistence(PATIENT_SIGNUP_FAILED, e))?
    };

    tracing::info!(id = %patient.id, "Patient signed up");
    found_at("/patient-home", &patient.id.to_string())
}

/// `POST /patient-register`: name and password only; profile fields in the
/// body are ignored.
pub async fn patient_register(
    State(ctx): State<ApiContext>,
    FormOrJson(new): FormOrJson<NewAccount>,
) -> Result<View<PatientHome>, ApiError> {
    let registration = NewPatient {
        name: new.name,
        password: new.password,
        ..Default::default()
    };
    let conn = ctx.core.lock_db()?;
    let patient = db::insert_patient(&conn, &registration)
        .map_err(|e| ApiError::persistence(PATIENT_REGISTER_FAILED, e))?;

    tracing::info!(id = %patient.id, "Patient registered");
    Ok(View::with_data(
        "patient-home",
        PatientHome {
            patient,
            suggestions: Vec::new(),
            patient_data: None,
        },
    ))
}

// ═══════════════════════════════════════════════════════════
// Login
// ═══════════════════════════════════════════════════════════

/// `POST /login`
pub async fn admin_login(
    State(ctx): State<ApiContext>,
    FormOrJson(creds): FormOrJson<NewAccount>,
) -> Result<View<()>, ApiError> {
    let (name, password) = credentials(&creds)?;
    tracing::info!(name, "Admin login attempt");

    let admin = {
        let conn = ctx.core.lock_db()?;
        db::find_account_by_name(&conn, AccountRole::Admin, name)?
    };
    match admin {
        Some(admin) if password_matches(&admin.password, password) => Ok(View::page("home")),
        _ => Err(ApiError::InvalidCredentials),
    }
}

/// `POST /doctor-login`
pub async fn doctor_login(
    State(ctx): State<ApiContext>,
    FormOrJson(creds): FormOrJson<NewAccount>,
) -> Result<Response, ApiError> {
    let (name, password) = credentials(&creds)?;
    tracing::info!(name, "Doctor login attempt");

    let doctor = {
        let conn = ctx.core.lock_db()?;
        db::find_account_by_name(&conn, AccountRole::Doctor, name)?
    };
    match doctor {
        Some(doctor) if password_matches(&doctor.password, password) => {
            found_at("/doctor-home", &doctor.id.to_string())
        }
        _ => Err(ApiError::InvalidCredentials),
    }
}

/// `POST /patient-login`
pub async fn patient_login(
    State(ctx): State<ApiContext>,
    FormOrJson(creds): FormOrJson<NewAccount>,
) -> Result<Response, ApiError> {
    let (name, password) = credentials(&creds)?;
    tracing::info!(name, "Patient login attempt");

    let patient = {
        let conn = ctx.core.lock_db()?;
        db::find_patient_by_name(&conn, name)?
    };
    match patient {
        Some(patient) if password_matches(&patient.password, password) => {
            found_at("/patient-home", &patient.id.to_string())
        }
        _ => Err(ApiError::InvalidCredentials),
    }
}

/// A login without both fields can never match a stored account.
fn credentials(creds: &NewAccount) -> Result<(&str, &str), ApiError> {
    match (creds.name.as_deref(), creds.password.as_deref()) {
        (Some(name), Some(password)) if !name.is_empty() => Ok((name, password)),
        _ => Err(ApiError::InvalidCredentials),
    }
}

fn password_matches(stored: &str, submitted: &str) -> bool {
    stored.as_bytes().ct_eq(submitted.as_bytes()).into()
}
