//! Session categories.

use serde::{Deserialize, Serialize};

use crate::error::FocusError;

/// What a focus session was spent on.
///
/// The serialized form is the display label, so persisted sessions read
/// `"Work"`, `"Study"` and so on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SessionCategory {
    /// Work
    Work,
    /// Study
    Study,
    /// Reading
    Reading,
    /// Coding
    Coding,
    /// Exercise
    Exercise,
    /// Meditation
    Meditation,
    /// Anything else
    #[default]
    Other,
}

impl SessionCategory {
    /// Every category, in enumeration order.
    pub const ALL: [Self; 7] = [
        Self::Work,
        Self::Study,
        Self::Reading,
        Self::Coding,
        Self::Exercise,
        Self::Meditation,
        Self::Other,
    ];

    /// Get display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Reading => "Reading",
            Self::Coding => "Coding",
            Self::Exercise => "Exercise",
            Self::Meditation => "Meditation",
            Self::Other => "Other",
        }
    }

    /// Get the glyph shown next to the label.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Work => "💼",
            Self::Study => "📚",
            Self::Reading => "📖",
            Self::Coding => "💻",
            Self::Exercise => "🏃",
            Self::Meditation => "🧘",
            Self::Other => "✨",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Work => 0,
            Self::Study => 1,
            Self::Reading => 2,
            Self::Coding => 3,
            Self::Exercise => 4,
            Self::Meditation => 5,
            Self::Other => 6,
        }
    }

    /// The next category, wrapping around.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous category, wrapping around.
    #[must_use]
    pub const fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse a category from user input (case-insensitive label).
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidInput` if no category matches.
    pub fn parse(s: &str) -> Result<Self, FocusError> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known = Self::ALL
                    .iter()
                    .map(Self::label)
                    .collect::<Vec<_>>()
                    .join(", ");
                FocusError::InvalidInput(format!("Unknown category '{wanted}' (expected one of {known})"))
            })
    }
}

impl std::fmt::Display for SessionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
