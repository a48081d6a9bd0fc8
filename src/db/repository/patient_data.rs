use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use uuid::Uuid;

use super::{format_timestamp, now, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::{Measurement, MeasurementValues, PatientData};

/// Append one measurement to a patient's log, creating the log on first use.
///
/// Runs in a single immediate transaction: the parent row is claimed with
/// `INSERT OR IGNORE` against the unique `patient_id`, and the measurement
/// is its own row, so concurrent appends for one patient cannot overwrite
/// each other.
pub fn append_measurement(
    conn: &Connection,
    patient_id: &Uuid,
    values: &MeasurementValues,
) -> Result<(), DatabaseError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    tx.execute(
        "INSERT OR IGNORE INTO patient_data (id, patient_id) VALUES (?1, ?2)",
        params![Uuid::new_v4().to_string(), patient_id.to_string()],
    )?;

    let data_id: String = tx.query_row(
        "SELECT id FROM patient_data WHERE patient_id = ?1",
        params![patient_id.to_string()],
        |row| row.get(0),
    )?;

    tx.execute(
        "INSERT INTO patient_data_values (patient_data_id, value1, value2, value3, value4, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            data_id,
            values.value1,
            values.value2,
            values.value3,
            values.value4,
            format_timestamp(&now()),
        ],
    )?;

    tx.commit()?;
    Ok(())
}

/// The patient's measurement log, or `None` before the first append.
pub fn get_patient_data(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<PatientData>, DatabaseError> {
    let header = conn
        .query_row(
            "SELECT id, patient_id FROM patient_data WHERE patient_id = ?1",
            params![patient_id.to_string()],
            |row| Ok((uuid_column(row, 0)?, uuid_column(row, 1)?)),
        )
        .optional()?;

    let Some((id, patient_id)) = header else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT value1, value2, value3, value4, recorded_at
         FROM patient_data_values
         WHERE patient_data_id = ?1
         ORDER BY seq ASC",
    )?;
    let rows = stmt.query_map(params![id.to_string()], |row| {
        Ok(Measurement {
            values: MeasurementValues {
                value1: row.get(0)?,
                value2: row.get(1)?,
                value3: row.get(2)?,
                value4: row.get(3)?,
            },
            recorded_at: timestamp_column(row, 4)?,
        })
    })?;
    let values = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(Some(PatientData {
        id,
        patient_id,
        values,
    }))
}
