//! Error types for focusflow.

use thiserror::Error;

use crate::features::focus::TimerPhase;

/// Errors produced by the focusflow library.
#[derive(Debug, Error)]
pub enum FocusError {
    /// Configuration could not be read, written or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite backend failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A blob store read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input or persisted data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A user-supplied value was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A timer transition was requested from a phase that does not allow it.
    #[error("Cannot {action} while the timer is {phase}")]
    InvalidTransition {
        /// The attempted transition.
        action: &'static str,
        /// The phase the timer was in.
        phase: TimerPhase,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FocusError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for FocusError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = FocusError::InvalidTransition {
            action: "pause",
            phase: TimerPhase::Idle,
        };
        assert_eq!(err.to_string(), "Cannot pause while the timer is idle");
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = FocusError::from(json_err);
        assert!(matches!(err, FocusError::Parse(_)));
    }
}
