//! Blob persistence backends.
//!
//! Session history is stored as a single named document. Backends only move
//! bytes; encoding is the session store's job.

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::FocusError;

/// A single-document byte store.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore {
    /// Read the stored document, or `None` if nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self) -> Result<Option<Vec<u8>>, FocusError>;

    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&mut self, bytes: &[u8]) -> Result<(), FocusError>;
}

/// In-memory blob store.
///
/// Clones share the same buffer, so a test can keep a handle and inspect what
/// the session store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    data: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with a document.
    #[must_use]
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Rc::new(RefCell::new(Some(bytes.into()))),
        }
    }

    /// Current contents.
    #[must_use]
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.borrow().clone()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self) -> Result<Option<Vec<u8>>, FocusError> {
        Ok(self.data.borrow().clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), FocusError> {
        *self.data.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

/// File-backed blob store.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers see either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    /// Create a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self) -> Result<Option<Vec<u8>>, FocusError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FocusError::Storage(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), FocusError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        let mut file = fs::File::create(&temp).map_err(|e| {
            FocusError::Storage(format!("Failed to create {}: {e}", temp.display()))
        })?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| {
            FocusError::Storage(format!(
                "Failed to replace {}: {e}",
                self.path.display()
            ))
        })
    }
}
