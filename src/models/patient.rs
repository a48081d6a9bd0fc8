use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub condition: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Patient signup payload as submitted. `age` stays textual until insert,
/// where an unparsable value is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPatient {
    #[serde(default, deserialize_with = "super::form::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub condition: Option<String>,
}
