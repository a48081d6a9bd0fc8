use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-text note a doctor leaves on a patient's record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub suggestion: Option<String>,
    pub created_at: NaiveDateTime,
}
