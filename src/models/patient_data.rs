use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged reading. The four slots are opaque strings stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementValues {
    #[serde(default, deserialize_with = "super::form::text")]
    pub value1: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub value2: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub value3: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub value4: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(flatten)]
    pub values: MeasurementValues,
    pub recorded_at: NaiveDateTime,
}

/// Append-only measurement log, at most one per patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientData {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub values: Vec<Measurement>,
}
