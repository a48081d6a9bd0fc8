use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles that authenticate with a bare name + password account.
/// Patients carry extra profile fields and live in their own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Admin,
    Doctor,
}

impl AccountRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Doctor => "doctor",
        }
    }

    pub(crate) fn table(self) -> &'static str {
        match self {
            AccountRole::Admin => "admins",
            AccountRole::Doctor => "doctors",
        }
    }
}

/// An admin or doctor account. The password never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub role: AccountRole,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    #[serde(default, deserialize_with = "super::form::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::form::text")]
    pub password: Option<String>,
}
