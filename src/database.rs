use once_cell::sync::OnceCell;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::Path;

use crate::error::StudyDeskError;
use crate::schema::CREATE_SCHEMA_SQL;

const DB_FILENAME: &str = "studydesk.db";
const SCHEMA_VERSION: &str = "1";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

static POOL: OnceCell<DbPool> = OnceCell::new();

pub struct Database;

impl Database {
    /// Open (or create) the database under `db_folder` and install the global
    /// connection pool. Idempotent: calling again after a successful init is
    /// a no-op.
    pub fn init(db_folder: &Path) -> Result<(), StudyDeskError> {
        if POOL.get().is_some() {
            return Ok(());
        }

        fs::create_dir_all(db_folder)?;
        let db_path = db_folder.join(DB_FILENAME);

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder().build(manager)?;

        {
            let conn = pool.get()?;
            Self::ensure_schema(&conn)?;
        }

        log::info!("Database ready at {}", db_path.display());

        // A racing second init loses; its pool is dropped.
        let _ = POOL.set(pool);
        Ok(())
    }

    /// Get a pooled connection. Handlers hold it for one request and release
    /// it on all exit paths when the guard drops.
    pub fn get_connection() -> Result<DbConn, StudyDeskError> {
        let pool = POOL
            .get()
            .ok_or_else(|| StudyDeskError::Error("Database is not initialized".to_string()))?;
        Ok(pool.get()?)
    }

    /// Create the schema if absent and verify the stored version.
    pub fn ensure_schema(conn: &Connection) -> Result<(), StudyDeskError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='meta'",
                [],
                |row| row.get::<_, i32>(0),
            )
            .map(|count| count > 0)
            .unwrap_or(false);

        if !table_exists {
            conn.execute_batch(CREATE_SCHEMA_SQL)?;
            return Ok(());
        }

        // Get the stored schema version
        let stored_version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match stored_version.as_deref() {
            Some(SCHEMA_VERSION) => Ok(()), // Schema is up to date
            Some(other) => Err(StudyDeskError::Error(format!(
                "Schema version mismatch: found '{}', expected '{}'",
                other, SCHEMA_VERSION
            ))),
            None => Err(StudyDeskError::Error(
                "Schema version missing".to_string(),
            )),
        }
    }

    /// Run `f` inside a BEGIN IMMEDIATE transaction. The write lock is taken
    /// up front, which gives delete-then-insert sequences a single-writer
    /// guarantee across requests.
    pub fn immediate_transaction<T, F>(conn: &Connection, f: F) -> Result<T, StudyDeskError>
    where
        F: FnOnce(&Connection) -> Result<T, StudyDeskError>,
    {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(conn) {
            Ok(value) => {
                conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(err) => {
                let _ = conn.execute_batch("ROLLBACK");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_init_creates_schema_and_pool() {
        let dir = tempfile::tempdir().unwrap();
        Database::init(dir.path()).unwrap();

        let conn = Database::get_connection().unwrap();
        let version: String = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    #[serial]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        Database::init(dir.path()).unwrap();
        Database::init(dir.path()).unwrap();
        assert!(Database::get_connection().is_ok());
    }

    #[test]
    fn test_ensure_schema_rejects_version_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        Database::ensure_schema(&conn).unwrap();
        conn.execute(
            "UPDATE meta SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();
        assert!(Database::ensure_schema(&conn).is_err());
    }

    #[test]
    fn test_immediate_transaction_rolls_back_on_error() {
        let conn = Connection::open_in_memory().unwrap();
        Database::ensure_schema(&conn).unwrap();

        let result: Result<(), StudyDeskError> = Database::immediate_transaction(&conn, |c| {
            c.execute(
                "INSERT INTO lessons (day, subject) VALUES ('Monday', 'Math')",
                [],
            )?;
            Err(StudyDeskError::Error("boom".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM lessons", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
