//! Schema bootstrap and connection pragmas.
//!
//! Only creates tables that are missing. Existing tables are left as they
//! are; there is no migration step.

use rusqlite::Connection;
use std::time::Duration;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Apply per-connection pragmas.
pub fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(BUSY_TIMEOUT)
}

/// Create the `users` and `tickets` tables if they do not exist.
///
/// Ticket payload columns carry no declared type so that values keep the
/// JSON type they were submitted with.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            role TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);

        CREATE TABLE IF NOT EXISTS tickets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id NOT NULL,
            service NOT NULL,
            priority NOT NULL,
            assigned_department NOT NULL,
            status TEXT NOT NULL DEFAULT 'Pending'
        );
        "#,
    )?;

    tracing::debug!("Schema initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("SELECT name FROM pragma_table_info('{table}')"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        apply_pragmas(&conn).unwrap();
        initialize_schema(&conn).unwrap();

        assert_eq!(
            table_columns(&conn, "users"),
            vec!["id", "username", "email", "password", "role"]
        );
        assert_eq!(
            table_columns(&conn, "tickets"),
            vec![
                "id",
                "student_id",
                "service",
                "priority",
                "assigned_department",
                "status"
            ]
        );
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO tickets (student_id, service, priority, assigned_department) VALUES ('s', 'x', 'low', 'it')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
