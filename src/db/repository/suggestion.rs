use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, now, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::Suggestion;

/// Record a suggestion against a patient id. The patient is not checked.
pub fn insert_suggestion(
    conn: &Connection,
    patient_id: &Uuid,
    text: Option<&str>,
) -> Result<Suggestion, DatabaseError> {
    let suggestion = Suggestion {
        id: Uuid::new_v4(),
        patient_id: *patient_id,
        suggestion: text.map(str::to_string),
        created_at: now(),
    };

    conn.execute(
        "INSERT INTO suggestions (id, patient_id, suggestion, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            suggestion.id.to_string(),
            suggestion.patient_id.to_string(),
            suggestion.suggestion,
            format_timestamp(&suggestion.created_at),
        ],
    )?;
    Ok(suggestion)
}

/// All suggestions for a patient, oldest first.
pub fn list_suggestions_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Suggestion>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, suggestion, created_at
         FROM suggestions
         WHERE patient_id = ?1
         ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok(Suggestion {
            id: uuid_column(row, 0)?,
            patient_id: uuid_column(row, 1)?,
            suggestion: row.get(2)?,
            created_at: timestamp_column(row, 3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
