//! Process-wide application state.
//!
//! `CoreState` owns the single record-store connection opened at startup.
//! rusqlite connections are `Send` but not `Sync`, so it sits behind a
//! `Mutex`; handlers take the guard, run their queries, and drop it before
//! any `.await`.

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use thiserror::Error;

use crate::config::DatabaseLocation;
use crate::db::{self, DatabaseError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub struct CoreState {
    db: Mutex<Connection>,
    pub location: DatabaseLocation,
}

impl CoreState {
    /// Open (and migrate) the record store at `location`.
    pub fn open(location: &DatabaseLocation) -> Result<Self, CoreError> {
        let conn = db::open_location(location)?;
        tracing::info!(%location, "Record store opened");
        Ok(Self {
            db: Mutex::new(conn),
            location: location.clone(),
        })
    }

    /// Fresh in-memory store.
    pub fn in_memory() -> Result<Self, CoreError> {
        Self::open(&DatabaseLocation::Memory)
    }

    /// Exclusive access to the shared connection.
    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.db.lock().map_err(|_| CoreError::LockPoisoned)
    }
}
