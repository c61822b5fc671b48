//! User queries.
//!
//! Registration checks and the insert run inside one immediate transaction,
//! so concurrent registrations cannot both pass the single-admin check.

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde_json::Value;

use super::row::value_ref_to_json;
use super::StoreError;
use crate::password::hash_password;
use crate::ADMIN_ROLE;

/// Fields of a registration request after presence validation.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created { id: i64 },
    EmailTaken,
    UsernameTaken,
    AdminExists,
}

/// What login needs from a stored user.
///
/// Never serialized; only `role` leaves the server.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub password_hash: String,
    /// Passed through as stored, whatever its SQLite type.
    pub role: Value,
}

/// Register a user.
///
/// Checks run in order: email, username, then the admin limit. The password
/// is hashed only once every check has passed.
pub fn register_user(conn: &mut Connection, user: &NewUser<'_>) -> Result<Registration, StoreError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if exists(&tx, "SELECT 1 FROM users WHERE email = ?1", user.email)? {
        return Ok(Registration::EmailTaken);
    }

    if exists(&tx, "SELECT 1 FROM users WHERE username = ?1", user.username)? {
        return Ok(Registration::UsernameTaken);
    }

    if user.role == ADMIN_ROLE && count_admins(&tx)? >= 1 {
        return Ok(Registration::AdminExists);
    }

    let password_hash = hash_password(user.password)?;
    tx.execute(
        "INSERT INTO users (username, email, password, role) VALUES (?1, ?2, ?3, ?4)",
        params![user.username, user.email, password_hash, user.role],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Registration::Created { id })
}

/// Look up the credentials of a user by exact username.
///
/// Only the password and role columns are read, so other columns of an
/// externally provisioned table may hold anything.
pub fn find_credentials(conn: &Connection, username: &str) -> Result<Option<Credentials>, StoreError> {
    let credentials = conn
        .query_row(
            "SELECT password, role FROM users WHERE username = ?1 LIMIT 1",
            [username],
            |row| {
                // Hashes may have been written as TEXT or BLOB.
                let password_hash = match row.get_ref(0)? {
                    ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                        String::from_utf8_lossy(bytes).into_owned()
                    }
                    _ => String::new(),
                };
                Ok(Credentials {
                    password_hash,
                    role: value_ref_to_json(row.get_ref(1)?),
                })
            },
        )
        .optional()?;
    Ok(credentials)
}

/// Number of users holding the admin role.
pub fn count_admins(conn: &Connection) -> Result<i64, StoreError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = ?1",
        [ADMIN_ROLE],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn exists(conn: &Connection, sql: &str, value: &str) -> Result<bool, StoreError> {
    let found = conn
        .query_row(sql, [value], |_| Ok(()))
        .optional()?
        .is_some();
    Ok(found)
}
