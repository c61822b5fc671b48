//! Connection provider for the on-disk store.
//!
//! Every request opens its own connection and drops it before the response
//! is produced. There is no pooling: SQLite's own file locking governs
//! concurrent access between requests.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::schema::apply_pragmas;
use crate::password::HashError;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("store task failed: {0}")]
    Task(String),
}

/// Handle to the SQLite database file.
///
/// Cloning is cheap; the handle only carries the path.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: Arc<PathBuf>,
}

impl Store {
    /// Create a store handle for the given database path.
    ///
    /// The file is not touched until the first [`Store::open`].
    pub fn new<P: Into<PathBuf>>(db_path: P) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection with pragmas applied.
    ///
    /// The connection is closed when the returned value is dropped.
    pub fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(self.db_path.as_path())?;
        apply_pragmas(&conn)?;
        Ok(conn)
    }

    /// Run `f` against a new connection on the blocking thread pool.
    ///
    /// The connection lives only for the duration of `f`, so it is released
    /// on success, on error and on panic alike.
    pub async fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let store = self.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let mut conn = store.open()?;
            f(&mut conn)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(e) => Err(StoreError::Task(e.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let store = Store::new(&db_path);

        {
            let conn = store.open().unwrap();
            conn.execute_batch("CREATE TABLE t (x INTEGER)").unwrap();
        }

        assert!(db_path.exists());
        assert_eq!(store.path(), db_path.as_path());
    }

    #[tokio::test]
    async fn test_with_connection_returns_closure_result() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.db"));

        let value: i64 = store
            .with_connection(|conn| {
                conn.query_row("SELECT 40 + 2", [], |row| row.get(0))
                    .map_err(StoreError::from)
            })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_with_connection_propagates_errors() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.db"));

        let result: Result<(), StoreError> = store
            .with_connection(|conn| {
                conn.execute("INSERT INTO missing_table VALUES (1)", [])?;
                Ok(())
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing_table"));
    }

    #[tokio::test]
    async fn test_with_connection_surfaces_panics() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.db"));

        let result: Result<(), StoreError> = store
            .with_connection(|_conn| panic!("boom"))
            .await;

        assert!(matches!(result, Err(StoreError::Task(_))));
    }
}
