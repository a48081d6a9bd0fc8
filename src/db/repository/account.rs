use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, now, required_field, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::{Account, AccountRole, NewAccount};

/// Persist a new admin or doctor account. Name and password are required.
pub fn insert_account(
    conn: &Connection,
    role: AccountRole,
    new: &NewAccount,
) -> Result<Account, DatabaseError> {
    let account = Account {
        id: Uuid::new_v4(),
        role,
        name: required_field("name", &new.name)?.to_string(),
        password: required_field("password", &new.password)?.to_string(),
        created_at: now(),
    };

    conn.execute(
        &format!(
            "INSERT INTO {} (id, name, password, created_at) VALUES (?1, ?2, ?3, ?4)",
            role.table()
        ),
        params![
            account.id.to_string(),
            account.name,
            account.password,
            format_timestamp(&account.created_at),
        ],
    )?;
    Ok(account)
}

pub fn get_account(
    conn: &Connection,
    role: AccountRole,
    id: &Uuid,
) -> Result<Account, DatabaseError> {
    conn.query_row(
        &format!(
            "SELECT id, name, password, created_at FROM {} WHERE id = ?1",
            role.table()
        ),
        params![id.to_string()],
        |row| row_to_account(row, role),
    )
    .optional()?
    .ok_or_else(|| DatabaseError::NotFound {
        entity_type: role.as_str().into(),
        id: id.to_string(),
    })
}

/// First account created under `name`. Names are not unique, so later
/// duplicates are shadowed.
pub fn find_account_by_name(
    conn: &Connection,
    role: AccountRole,
    name: &str,
) -> Result<Option<Account>, DatabaseError> {
    let account = conn
        .query_row(
            &format!(
                "SELECT id, name, password, created_at FROM {}
                 WHERE name = ?1 ORDER BY rowid ASC LIMIT 1",
                role.table()
            ),
            params![name],
            |row| row_to_account(row, role),
        )
        .optional()?;
    Ok(account)
}

fn row_to_account(row: &rusqlite::Row, role: AccountRole) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: uuid_column(row, 0)?,
        role,
        name: row.get(1)?,
        password: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
    })
}
