//! Completed focus sessions.
//!
//! A session is created once, when the timer stops or reaches its target.
//! Only its category and note may change afterwards.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::SessionCategory;

/// A completed focus session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Unique identifier, never reused
    pub id: Uuid,
    /// Focused time in seconds
    pub duration: f64,
    /// When the session was recorded
    pub date: DateTime<Utc>,
    /// What the time was spent on
    pub category: SessionCategory,
    /// Optional annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FocusSession {
    /// Create a session dated now.
    ///
    /// Negative durations are clamped to zero and blank notes are dropped.
    #[must_use]
    pub fn new(duration: f64, category: SessionCategory, note: Option<String>) -> Self {
        Self::with_date(duration, category, note, Utc::now())
    }

    /// Create a session with an explicit timestamp.
    #[must_use]
    pub fn with_date(
        duration: f64,
        category: SessionCategory,
        note: Option<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            duration: duration.max(0.0),
            date,
            category,
            note: normalize_note(note),
        }
    }

    /// Whether the persisted fields satisfy the session invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.duration.is_finite() && self.duration >= 0.0
    }

    /// Recording time in the local timezone.
    #[must_use]
    pub fn date_local(&self) -> DateTime<Local> {
        self.date.with_timezone(&Local)
    }

    /// Duration as `HH:MM:SS`, or `MM:SS` under an hour.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_clock(whole_seconds(self.duration))
    }

    /// Duration as `1h 5m`, or `25m` under an hour.
    #[must_use]
    pub fn short_formatted_duration(&self) -> String {
        format_short(self.duration)
    }

    /// First eight characters of the id, enough to address a session from the CLI.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// Treat an empty or whitespace-only note as absent.
#[must_use]
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.and_then(|n| {
        let trimmed = n.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    }
}

/// Format whole seconds as `HH:MM:SS`, or `MM:SS` under an hour.
#[must_use]
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = total_seconds / 60 % 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format seconds as a short string (e.g., "25m", "1h 30m").
#[must_use]
pub fn format_short(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3600;
    let minutes = total / 60 % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new() {
        let session = FocusSession::new(1500.0, SessionCategory::Work, Some("draft".to_string()));

        assert!((session.duration - 1500.0).abs() < f64::EPSILON);
        assert_eq!(session.category, SessionCategory::Work);
        assert_eq!(session.note.as_deref(), Some("draft"));
        assert!(session.is_valid());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = FocusSession::new(1.0, SessionCategory::Other, None);
        let b = FocusSession::new(1.0, SessionCategory::Other, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_note_is_absent() {
        let session = FocusSession::new(60.0, SessionCategory::Study, Some("   ".to_string()));
        assert!(session.note.is_none());
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let session = FocusSession::new(-5.0, SessionCategory::Other, None);
        assert!(session.duration.abs() < f64::EPSILON);
    }

    #[test]
    fn test_formatted_duration() {
        let short = FocusSession::new(90.0, SessionCategory::Work, None);
        assert_eq!(short.formatted_duration(), "01:30");

        let long = FocusSession::new(3725.0, SessionCategory::Work, None);
        assert_eq!(long.formatted_duration(), "01:02:05");
    }

    #[test]
    fn test_short_formatted_duration() {
        assert_eq!(format_short(1500.0), "25m");
        assert_eq!(format_short(5400.0), "1h 30m");
        assert_eq!(format_short(0.0), "0m");
    }

    #[test]
    fn test_json_shape() {
        let session = FocusSession::new(600.0, SessionCategory::Reading, None);
        let value = serde_json::to_value(&session).unwrap();

        assert_eq!(value["category"], "Reading");
        assert_eq!(value["duration"], 600.0);
        assert!(value["id"].is_string());
        assert!(value["date"].is_string());
        assert!(value.get("note").is_none());
    }

    #[test]
    fn test_short_id_prefixes_id() {
        let session = FocusSession::new(1.0, SessionCategory::Other, None);
        assert_eq!(session.short_id().len(), 8);
        assert!(session.id.simple().to_string().starts_with(&session.short_id()));
    }
}
