//! Event handling for the timer screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FocusError;

/// Action to take after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause, resume, or start a new session from Idle.
    TogglePause,
    /// Stop and save the session in progress.
    Stop,
    /// Select the next category.
    NextCategory,
    /// Select the previous category.
    PreviousCategory,
    /// Toggle the help overlay.
    Help,
    /// Stop, save and leave.
    Quit,
}

/// Wait up to `timeout` for a key press.
///
/// Returns `None` when the timeout passes or a non-key event arrives.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_key(timeout: Duration) -> Result<Option<KeyEvent>, FocusError> {
    if !event::poll(timeout).map_err(|e| FocusError::Config(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| FocusError::Config(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action.
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char(' ' | 'p') => Some(Action::TogglePause),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('c') | KeyCode::Right | KeyCode::Tab => Some(Action::NextCategory),
        KeyCode::Char('C') | KeyCode::Left | KeyCode::BackTab => Some(Action::PreviousCategory),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
