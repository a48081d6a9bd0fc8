use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;
use crate::config::DatabaseLocation;

/// Open the configured record store and run migrations.
pub fn open_location(location: &DatabaseLocation) -> Result<Connection, DatabaseError> {
    match location {
        DatabaseLocation::Memory => open_memory_database(),
        DatabaseLocation::File(path) => open_database(path),
    }
}

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![(
        1,
        include_str!("../../resources/migrations/001_initial.sql"),
    )];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, i64>(0)
    })
    .unwrap_or(0)
}

/// Cheapest possible round trip through the connection.
pub fn ping(conn: &Connection) -> Result<(), DatabaseError> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        // schema_version + admins + doctors + patients + suggestions + patient_data + patient_data_values
        let count = count_tables(&conn).unwrap();
        assert_eq!(count, 7, "Expected 7 tables, got {count}");
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        let result = run_migrations(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn ping_succeeds_on_open_database() {
        let conn = open_memory_database().unwrap();
        assert!(ping(&conn).is_ok());
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn database_reopens_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");

        let conn = open_location(&DatabaseLocation::File(path.clone())).unwrap();
        conn.execute(
            "INSERT INTO admins (id, name, password, created_at) VALUES ('a-1', 'root', 'pw', '2024-01-01 00:00:00')",
            [],
        )
        .unwrap();
        drop(conn);

        let conn = open_database(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn empty_name_rejected_by_schema() {
        let conn = open_memory_database().unwrap();
        let result = conn.execute(
            "INSERT INTO doctors (id, name, password, created_at) VALUES ('d-1', '', 'pw', '2024-01-01 00:00:00')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn patient_data_is_unique_per_patient() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO patient_data (id, patient_id) VALUES ('pd-1', 'p-1')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO patient_data (id, patient_id) VALUES ('pd-2', 'p-1')",
            [],
        );
        assert!(result.is_err());
    }
}
