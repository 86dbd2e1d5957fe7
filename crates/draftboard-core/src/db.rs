// SQLite persistence layer: a single key-value table of JSON blobs.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::store::BlobStore;

/// SQLite-backed blob store.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS draft_state (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection. A poisoned lock is an error so
    /// callers on the persistence path can log it and carry on.
    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database mutex poisoned"))
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn save_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO draft_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET
                value      = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value],
        )
        .context("failed to save state")?;
        Ok(())
    }

    /// Load the value stored under `key`. Returns `None` if the key does not
    /// exist.
    pub fn load_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM draft_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .context("failed to query draft state")
    }
}

impl BlobStore for Database {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.load_state(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.save_state(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: create a fresh in-memory database for each test.
    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    #[test]
    fn open_creates_table() {
        let db = test_db();
        let conn = db.conn().unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(tables.contains(&"draft_state".to_string()));
    }

    #[test]
    fn missing_key_is_none() {
        let db = test_db();
        assert_eq!(db.load_state("nope").unwrap(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let db = test_db();
        db.save_state("board", r#"{"1":"mine"}"#).unwrap();
        assert_eq!(
            db.load_state("board").unwrap().as_deref(),
            Some(r#"{"1":"mine"}"#)
        );
    }

    #[test]
    fn save_overwrites_previous_value() {
        let db = test_db();
        db.save_state("board", "{}").unwrap();
        db.save_state("board", r#"{"2":"taken"}"#).unwrap();
        assert_eq!(
            db.load_state("board").unwrap().as_deref(),
            Some(r#"{"2":"taken"}"#)
        );
        let count: i64 = db
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM draft_state", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn keys_are_independent() {
        let db = test_db();
        db.save_state("a", "1").unwrap();
        db.save_state("b", "2").unwrap();
        assert_eq!(db.load_state("a").unwrap().as_deref(), Some("1"));
        assert_eq!(db.load_state("b").unwrap().as_deref(), Some("2"));
    }

    /// Panic while holding the connection lock so the mutex is poisoned.
    fn poison(db: &Database) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = db.conn.lock().unwrap();
            panic!("panic while holding the connection");
        }));
        assert!(result.is_err());
    }

    #[test]
    fn poisoned_lock_is_an_error_not_a_panic() {
        let db = test_db();
        poison(&db);
        let err = db.save_state("board", "{}").unwrap_err();
        assert!(err.to_string().contains("poisoned"));
        assert!(db.load_state("board").is_err());
        assert!(BlobStore::write(&db, "board", "{}").is_err());
    }

    #[test]
    fn session_over_poisoned_database_keeps_working() {
        use crate::session::DraftSession;
        use crate::store::BlobPersistence;

        let db = test_db();
        poison(&db);
        let mut session = DraftSession::new(Box::new(BlobPersistence::with_default_key(db)));
        assert!(session.draft_map().is_empty());
        assert!(session.mark_mine(7));
        assert_eq!(session.status_of(7), crate::draft::DraftStatus::Mine);
    }

    #[test]
    fn file_backed_database_survives_reopen() {
        let dir = std::env::temp_dir().join("draftboard_db_reopen");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("board.db");
        let path_str = path.to_str().unwrap();

        {
            let db = Database::open(path_str).unwrap();
            db.save_state("board", r#"{"9":"mine"}"#).unwrap();
        }
        let db = Database::open(path_str).unwrap();
        assert_eq!(
            db.load_state("board").unwrap().as_deref(),
            Some(r#"{"9":"mine"}"#)
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn blob_store_trait_delegates() {
        let db = test_db();
        BlobStore::write(&db, "k", "v").unwrap();
        assert_eq!(BlobStore::read(&db, "k").unwrap().as_deref(), Some("v"));
    }
}
