//! Named session presets.

use serde::Serialize;

use super::category::SessionCategory;
use crate::error::FocusError;

/// A target duration paired with a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusPreset {
    /// Display name
    pub name: &'static str,
    /// Target in seconds
    pub duration: u64,
    /// Category applied when the preset is chosen
    pub category: SessionCategory,
}

impl FocusPreset {
    /// Built-in presets.
    pub const DEFAULTS: [Self; 5] = [
        Self::new("Quick Focus", 15 * 60, SessionCategory::Work),
        Self::new("Pomodoro", 25 * 60, SessionCategory::Study),
        Self::new("Deep Work", 90 * 60, SessionCategory::Coding),
        Self::new("Reading", 30 * 60, SessionCategory::Reading),
        Self::new("Meditation", 10 * 60, SessionCategory::Meditation),
    ];

    const fn new(name: &'static str, duration: u64, category: SessionCategory) -> Self {
        Self {
            name,
            duration,
            category,
        }
    }

    /// Kebab-case name, e.g. `deep-work`.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }

    /// Find a preset by name or slug, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::NotFound` if no preset matches.
    pub fn find(name: &str) -> Result<Self, FocusError> {
        let wanted = name.trim().to_lowercase();
        Self::DEFAULTS
            .into_iter()
            .find(|p| p.name.to_lowercase() == wanted || p.slug() == wanted)
            .ok_or_else(|| FocusError::NotFound(format!("No preset named '{}'", name.trim())))
    }
}
