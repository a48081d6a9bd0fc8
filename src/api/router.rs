//! Route table for the record service.
//!
//! Middleware stack (outermost → innermost):
//! 1. Access logger → 2. Handler (or static asset fallback)

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the full router.
///
/// When `public_dir` is set, unmatched paths are served from it as static
/// assets; otherwise they fall through to axum's 404.
pub fn care_records_router(core: Arc<CoreState>, public_dir: Option<PathBuf>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        // Admin
        .route("/", get(endpoints::pages::login))
        .route(
            "/signup",
            get(endpoints::pages::signup).post(endpoints::accounts::admin_signup),
        )
        .route("/login", post(endpoints::accounts::admin_login))
        // Doctor
        .route(
            "/doctor-signup",
            get(endpoints::pages::doctor_signup).post(endpoints::accounts::doctor_signup),
        )
        .route(
            "/doctor-login",
            get(endpoints::pages::doctor_login).post(endpoints::accounts::doctor_login),
        )
        .route("/doctor-home/:id", get(endpoints::doctors::home))
        .route(
            "/find-patient-details",
            get(endpoints::patients::find_by_query).post(endpoints::patients::find_by_form),
        )
        .route("/patient-details/:id", get(endpoints::patients::details))
        .route("/submit-suggestion", post(endpoints::suggestions::submit))
        // Patient
        .route(
            "/patient-signup",
            get(endpoints::pages::patient_signup).post(endpoints::accounts::patient_signup),
        )
        .route(
            "/patient-register",
            get(endpoints::pages::patient_register).post(endpoints::accounts::patient_register),
        )
        .route(
            "/patient-login",
            get(endpoints::pages::patient_login).post(endpoints::accounts::patient_login),
        )
        .route("/patient-home/:id", get(endpoints::patients::home))
        .route("/api/:id/values", get(endpoints::measurements::append))
        .with_state(ctx);

    let routes = match public_dir {
        Some(dir) => routes.fallback_service(ServeDir::new(dir)),
        None => routes,
    };

    routes.layer(axum::middleware::from_fn(middleware::audit::log_access))
}
