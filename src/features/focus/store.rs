//! Focus session storage.
//!
//! Keeps the ordered session list in memory and mirrors it to a blob store
//! after every mutation. Newest sessions come first.

use log::{debug, warn};
use uuid::Uuid;

use super::category::SessionCategory;
use super::session::{normalize_note, FocusSession};
use crate::error::FocusError;
use crate::storage::BlobStore;

/// Storage for focus sessions.
pub struct SessionStore {
    backend: Box<dyn BlobStore>,
    sessions: Vec<FocusSession>,
}

impl SessionStore {
    /// Create a store and load whatever the backend holds.
    #[must_use]
    pub fn open(backend: Box<dyn BlobStore>) -> Self {
        let mut store = Self {
            backend,
            sessions: Vec::new(),
        };
        store.sessions = store.load();
        store
    }

    /// Read and decode the persisted list.
    ///
    /// Missing, unreadable or corrupt data yields an empty list. Records that
    /// break the session invariants are skipped.
    #[must_use]
    pub fn load(&self) -> Vec<FocusSession> {
        let bytes = match self.backend.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read session history, starting empty: {e}");
                return Vec::new();
            }
        };

        let decoded: Vec<FocusSession> = match serde_json::from_slice(&bytes) {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!("Session history is corrupt, starting empty: {e}");
                return Vec::new();
            }
        };

        let total = decoded.len();
        let sessions: Vec<FocusSession> = decoded.into_iter().filter(FocusSession::is_valid).collect();
        if sessions.len() < total {
            warn!("Dropped {} invalid session record(s)", total - sessions.len());
        }

        debug!("Loaded {} session(s)", sessions.len());
        sessions
    }

    /// Write the in-memory list to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save(&mut self) -> Result<(), FocusError> {
        let bytes = serde_json::to_vec(&self.sessions)?;
        self.backend.write(&bytes)
    }

    /// Replace the in-memory list with `next` once it has been persisted.
    fn commit(&mut self, next: Vec<FocusSession>) -> Result<(), FocusError> {
        let bytes = serde_json::to_vec(&next)?;
        self.backend.write(&bytes)?;
        self.sessions = next;
        Ok(())
    }

    /// All sessions, newest first.
    #[must_use]
    pub fn sessions(&self) -> &[FocusSession] {
        &self.sessions
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Get a session by ID.
    #[must_use]
    pub fn find(&self, id: Uuid) -> Option<&FocusSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Resolve a full id or an unambiguous prefix of its simple form.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when nothing matches and `InvalidInput` when the
    /// prefix matches more than one session.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&FocusSession, FocusError> {
        let wanted = prefix.trim().to_lowercase();
        if let Ok(id) = Uuid::parse_str(&wanted) {
            return self
                .find(id)
                .ok_or_else(|| FocusError::NotFound(format!("No session with id {wanted}")));
        }

        let needle = wanted.replace('-', "");
        if needle.is_empty() {
            return Err(FocusError::InvalidInput("Session id is empty".to_string()));
        }

        let mut matches = self
            .sessions
            .iter()
            .filter(|s| s.id.simple().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(session), None) => Ok(session),
            (None, _) => Err(FocusError::NotFound(format!("No session matching '{wanted}'"))),
            (Some(_), Some(_)) => Err(FocusError::InvalidInput(format!(
                "Session id '{wanted}' is ambiguous"
            ))),
        }
    }

    /// Prepend a session and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the in-memory list is unchanged.
    pub fn insert(&mut self, session: FocusSession) -> Result<(), FocusError> {
        let mut next = Vec::with_capacity(self.sessions.len() + 1);
        next.push(session);
        next.extend(self.sessions.iter().cloned());
        self.commit(next)
    }

    /// Remove the session with `id` and persist.
    ///
    /// Returns `false` without touching the backend if no session matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the in-memory list is unchanged.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, FocusError> {
        if self.find(id).is_none() {
            return Ok(false);
        }

        let next = self.sessions.iter().filter(|s| s.id != id).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Remove every session and persist the empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the in-memory list is unchanged.
    pub fn clear(&mut self) -> Result<(), FocusError> {
        self.commit(Vec::new())
    }

    /// Apply a category and note correction with a single write.
    ///
    /// `note` of `None` leaves the note alone; `Some(None)` removes it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or the write error. Neither
    /// change is kept if the write fails.
    pub fn amend(
        &mut self,
        id: Uuid,
        category: Option<SessionCategory>,
        note: Option<Option<String>>,
    ) -> Result<(), FocusError> {
        let note = note.map(normalize_note);
        self.update(id, move |session| {
            if let Some(category) = category {
                session.category = category;
            }
            if let Some(note) = note {
                session.note = note;
            }
        })
    }

    fn update<F>(&mut self, id: Uuid, apply: F) -> Result<(), FocusError>
    where
        F: FnOnce(&mut FocusSession),
    {
        let mut next = self.sessions.clone();
        let session = next
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| FocusError::NotFound(format!("No session with id {id}")))?;
        apply(session);
        self.commit(next)
    }
}
