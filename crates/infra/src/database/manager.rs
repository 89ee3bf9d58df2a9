//! Database connection manager

use focustide_domain::{FocusTideError, Result};
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::info;

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS app_state (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    id         TEXT PRIMARY KEY,
    text       TEXT NOT NULL,
    completed  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
";

/// Owns the SQLite connection and the schema
///
/// A single connection behind a mutex is plenty here: every write is a
/// single-row upsert and the only concurrent writers are the background
/// worker and one foreground attachment.
pub struct DbManager {
    conn: Mutex<Connection>,
}

impl DbManager {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(map_sqlite_error)?;
        conn.execute_batch(SCHEMA).map_err(map_sqlite_error)?;
        info!(path, "database opened");
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Ephemeral in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_error)?;
        conn.execute_batch(SCHEMA).map_err(map_sqlite_error)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Run a closure against the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self.conn.lock();
        f(&conn).map_err(map_sqlite_error)
    }

    /// Read a value from the `app_state` key-value table.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM app_state WHERE key = ?1")?;
            let mut rows = stmt.query([key])?;
            match rows.next()? {
                Some(row) => Ok(Some(row.get(0)?)),
                None => Ok(None),
            }
        })
    }

    /// Upsert a value into the `app_state` key-value table.
    pub fn put_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO app_state (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .map(|_| ())
        })
    }
}

/// Convert a rusqlite error into the domain storage error.
pub(crate) fn map_sqlite_error(err: rusqlite::Error) -> FocusTideError {
    FocusTideError::Storage(err.to_string())
}

/// Convert a blocking-task join error into the domain error.
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> FocusTideError {
    FocusTideError::Internal(format!("blocking task failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_round_trip() {
        let db = DbManager::in_memory().unwrap();

        assert_eq!(db.get_value("missing").unwrap(), None);

        db.put_value("greeting", "hello").unwrap();
        assert_eq!(db.get_value("greeting").unwrap(), Some("hello".to_string()));

        db.put_value("greeting", "goodbye").unwrap();
        assert_eq!(db.get_value("greeting").unwrap(), Some("goodbye".to_string()));
    }

    #[test]
    fn schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focustide.db");
        let path = path.to_string_lossy();

        DbManager::new(&path).unwrap();
        // Re-opening applies the schema again without complaint.
        DbManager::new(&path).unwrap();
    }
}
