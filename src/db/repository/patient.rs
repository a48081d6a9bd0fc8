use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, now, required_field, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient};

const PATIENT_COLUMNS: &str = "id, name, password, age, gender, health_condition, created_at";

pub fn insert_patient(conn: &Connection, new: &NewPatient) -> Result<Patient, DatabaseError> {
    let patient = Patient {
        id: Uuid::new_v4(),
        name: required_field("name", &new.name)?.to_string(),
        password: required_field("password", &new.password)?.to_string(),
        age: parse_age(new.age.as_deref())?,
        gender: new.gender.clone(),
        condition: new.condition.clone(),
        created_at: now(),
    };

    conn.execute(
        "INSERT INTO patients (id, name, password, age, gender, health_condition, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.password,
            patient.age,
            patient.gender,
            patient.condition,
            format_timestamp(&patient.created_at),
        ],
    )?;
    Ok(patient)
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Patient, DatabaseError> {
    conn.query_row(
        &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
        params![id.to_string()],
        row_to_patient,
    )
    .optional()?
    .ok_or_else(|| DatabaseError::NotFound {
        entity_type: "patient".into(),
        id: id.to_string(),
    })
}

/// First patient created under `name`.
pub fn find_patient_by_name(conn: &Connection, name: &str) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            &format!(
                "SELECT {PATIENT_COLUMNS} FROM patients WHERE name = ?1 ORDER BY rowid ASC LIMIT 1"
            ),
            params![name],
            row_to_patient,
        )
        .optional()?;
    Ok(patient)
}

/// Every patient, oldest first. Not filtered by doctor.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY rowid ASC"
    ))?;
    let rows = stmt.query_map([], row_to_patient)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Blank age means "not given"; anything else must be a finite number.
fn parse_age(raw: Option<&str>) -> Result<Option<f64>, DatabaseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => match text.parse::<f64>() {
            Ok(age) if age.is_finite() => Ok(Some(age)),
            _ => Err(DatabaseError::ConstraintViolation(format!(
                "age must be a number, got {text:?}"
            ))),
        },
    }
}

fn row_to_patient(row: &rusqlite::Row) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: uuid_column(row, 0)?,
        name: row.get(1)?,
        password: row.get(2)?,
        age: row.get(3)?,
        gender: row.get(4)?,
        condition: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
    })
}
