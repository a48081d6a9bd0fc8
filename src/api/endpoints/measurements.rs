use axum::extract::State;
use axum::response::Response;

use crate::api::error::ApiError;
use crate::api::extract::{PathParam, QueryParams};
use crate::api::types::{found_at, parse_id, ApiContext};
use crate::db;
use crate::models::MeasurementValues;

/// `GET /api/:id/values?value1=..&value4=..`: append one measurement, then
/// back to the patient's home.
pub async fn append(
    State(ctx): State<ApiContext>,
    PathParam(id): PathParam<String>,
    QueryParams(values): QueryParams<MeasurementValues>,
) -> Result<Response, ApiError> {
    let patient_id = parse_id("patient", &id)?;
    {
        let conn = ctx.core.lock_db()?;
        db::append_measurement(&conn, &patient_id, &values)?;
    }

    tracing::info!(%patient_id, "Measurement appended");
    found_at("/patient-home", &patient_id.to_string())
}
