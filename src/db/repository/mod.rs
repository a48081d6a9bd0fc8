//! Repository layer: entity-scoped database operations.
//!
//! Every function takes a borrowed `Connection` and performs one logical
//! read or write. Row ordering is insertion order (`rowid`).

mod account;
mod patient;
mod patient_data;
mod suggestion;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use uuid::Uuid;

use super::DatabaseError;
use crate::models::TIMESTAMP_FORMAT;

pub use account::*;
pub use patient::*;
pub use patient_data::*;
pub use suggestion::*;

/// Current time as stored on new rows.
pub(crate) fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub(crate) fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Reject a missing or empty required text field before it reaches SQL.
pub(crate) fn required_field<'a>(
    field: &str,
    value: &'a Option<String>,
) -> Result<&'a str, DatabaseError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DatabaseError::ConstraintViolation(format!(
            "{field} is required"
        ))),
    }
}

pub(crate) fn uuid_column(row: &rusqlite::Row, idx: usize) -> Result<Uuid, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn timestamp_column(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<NaiveDateTime, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
