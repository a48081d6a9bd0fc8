//! Static form pages.

use crate::api::types::View;

/// `GET /`
pub async fn login() -> View<()> {
    View::page("login")
}

pub async fn doctor_login() -> View<()> {
    View::page("doctor-login")
}

pub async fn patient_login() -> View<()> {
    View::page("patient-login")
}

pub async fn signup() -> View<()> {
    View::page("signup")
}

pub async fn doctor_signup() -> View<()> {
    View::page("doctor-signup")
}

pub async fn patient_signup() -> View<()> {
    View::page("patient-signup")
}

/// `GET /patient-register`
pub async fn patient_register() -> View<()> {
    View::page("patient-registration")
}
