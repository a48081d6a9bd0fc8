//! API error types with terse plain-text responses.
//!
//! Every handler failure ends here. Details are logged, never returned:
//! clients see a one-line body and a 401 or 500 status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::core_state::CoreError;
use crate::db::DatabaseError;

/// Body returned for every unclassified failure.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown name or password mismatch on any login flow.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A create failed. `message` is the public body, e.g.
    /// "Error signing up and creating doctor".
    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: DatabaseError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn persistence(message: &'static str, source: impl Into<DatabaseError>) -> Self {
        ApiError::Persistence {
            message,
            source: source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidCredentials => {
                tracing::warn!("Rejected login: invalid credentials");
                (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS_MESSAGE)
            }
            ApiError::Persistence { message, source } => {
                tracing::error!(error = %source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, *message)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
        };

        (status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LockPoisoned => ApiError::Internal("database lock poisoned".into()),
            CoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
