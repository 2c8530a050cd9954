//! Storage layer for focusflow.
//!
//! Session history is a single named document. This module provides the
//! backends that hold it:
//! - `SQLite` key-value table (default)
//! - Plain JSON file
//! - In-memory buffer (tests)

mod blob;
mod database;
mod migrations;

#[cfg(test)]
pub use blob::MockBlobStore;
pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use database::{Database, SqliteBlobStore};

use crate::config::{Paths, StorageBackend};
use crate::error::FocusError;

/// Name of the document holding the session list.
pub const SESSIONS_KEY: &str = "focusSessions";

/// Open the configured backend for the session document.
///
/// # Errors
///
/// Returns an error if the data directory or database cannot be prepared.
pub fn open_backend(
    paths: &Paths,
    backend: StorageBackend,
) -> Result<Box<dyn BlobStore>, FocusError> {
    paths.ensure_dirs()?;

    match backend {
        StorageBackend::Sqlite => {
            let db = Database::open_at(&paths.database)?;
            Ok(Box::new(SqliteBlobStore::new(db, SESSIONS_KEY)))
        }
        StorageBackend::File => Ok(Box::new(FileBlobStore::new(&paths.sessions_file))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_backend_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        let mut store = open_backend(&paths, StorageBackend::File).unwrap();
        store.write(b"[]").unwrap();

        assert!(paths.sessions_file.exists());
    }

    #[test]
    fn test_open_backend_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        let mut store = open_backend(&paths, StorageBackend::Sqlite).unwrap();
        store.write(b"[]").unwrap();

        assert!(paths.database.exists());
        assert_eq!(store.read().unwrap(), Some(b"[]".to_vec()));
    }
}
