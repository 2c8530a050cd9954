//! `SQLite` database connection and key-value operations.
//!
//! The database is stored at `~/.focusflow/focusflow.db` and holds a single
//! `kv` table of named documents.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::FocusError;

use super::blob::BlobStore;
use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, FocusError> {
        let conn = Connection::open(path).map_err(|e| {
            FocusError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FocusError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FocusError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    fn migrate(&self) -> Result<(), FocusError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FocusError> {
        migrations::get_version(&self.conn)
    }

    /// Read a named document.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, FocusError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| FocusError::Database(format!("Failed to read '{key}': {e}")))
    }

    /// Insert or replace a named document.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn put_blob(&self, key: &str, value: &[u8]) -> Result<(), FocusError> {
        self.conn
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| FocusError::Database(format!("Failed to write '{key}': {e}")))?;

        Ok(())
    }
}

/// Blob store backed by one key of the `kv` table.
pub struct SqliteBlobStore {
    db: Database,
    key: String,
}

impl SqliteBlobStore {
    /// Create a store for `key` on an open database.
    #[must_use]
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self) -> Result<Option<Vec<u8>>, FocusError> {
        self.db.get_blob(&self.key)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), FocusError> {
        self.db.put_blob(&self.key, bytes)
    }
}
