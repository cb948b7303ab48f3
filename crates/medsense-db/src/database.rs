//! Database connection and schema management.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{DbError, Result};
use crate::schema::SCHEMA_SQL;

/// Main database handle.
///
/// `rusqlite::Connection` is not `Sync`, so access is serialised through a
/// mutex. Every call blocks the calling thread, so async callers run
/// repository methods under `tokio::task::spawn_blocking`.
pub struct Database {
    conn: Mutex<Connection>,
    path: String,
}

impl Database {
    /// Open or create a database file at the specified path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        configure_pragmas(&conn)?;
        debug!("Opened SQLite database at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string_lossy().to_string(),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: ":memory:".to_string(),
        })
    }

    /// Get the database path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create all tables if they don't exist.
    pub fn initialize(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA_SQL)?;
            Ok(())
        })
    }

    /// Run a closure with exclusive access to the connection.
    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&mut guard)
    }
}

fn configure_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db.initialize().unwrap();

        let tables: Vec<String> = db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .unwrap();
        assert_eq!(tables, vec!["diseases".to_string(), "symptoms".to_string()]);
    }

    #[test]
    fn test_open_creates_parent_dir_and_reports_path() {
        let dir = std::env::temp_dir().join(format!("medsense-db-{}", std::process::id()));
        let file = dir.join("nested").join("kb.db");

        let db = Database::open(&file).unwrap();
        db.initialize().unwrap();
        assert!(file.exists());
        assert_eq!(db.path(), file.to_string_lossy());
        assert_eq!(Database::open_in_memory().unwrap().path(), ":memory:");

        drop(db);
        let _ = std::fs::remove_dir_all(dir);
    }
}
