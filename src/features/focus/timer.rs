//! Live timer state and duration helpers.
//!
//! The timer counts whole seconds. It never reads a clock itself; a driver
//! delivers ticks through the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::SessionCategory;

/// Timer phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// No session in progress
    #[default]
    Idle,
    /// Session in progress and ticking
    Running,
    /// Session in progress, ticking halted
    Paused,
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Identifies one run of the recurring tick.
///
/// Every transition into Running issues a new handle; transitions out of
/// Running invalidate it. A tick carrying any other handle is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle {
    generation: u64,
}

impl TickHandle {
    pub(crate) const fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// Generation number of this handle.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Transient state of the session in progress.
#[derive(Debug, Clone, Default)]
pub struct TimerState {
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds accumulated in the current session
    pub elapsed: u64,
    /// Optional goal in seconds; `None` counts up without a target
    pub target: Option<u64>,
    /// Category for the session that will be recorded
    pub selected_category: SessionCategory,
    /// Note for the session that will be recorded
    pub pending_note: String,
    /// Wall-clock time of the most recent start or resume
    pub started_at: Option<DateTime<Utc>>,
}

impl TimerState {
    /// Create an idle timer with `category` selected.
    #[must_use]
    pub fn new(category: SessionCategory) -> Self {
        Self {
            selected_category: category,
            ..Self::default()
        }
    }

    /// Progress toward the target (0.0 - 1.0); 0 in stopwatch mode.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        match self.target {
            Some(target) if target > 0 => (self.elapsed as f64 / target as f64).min(1.0),
            _ => 0.0,
        }
    }

    /// Seconds left until the target, if one is set.
    #[must_use]
    pub fn remaining(&self) -> Option<u64> {
        self.target.map(|t| t.saturating_sub(self.elapsed))
    }

    /// Whether the target has been reached.
    #[must_use]
    pub fn target_reached(&self) -> bool {
        self.target.is_some_and(|t| self.elapsed >= t)
    }

    /// Return to Idle, keeping the selected category.
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.elapsed = 0;
        self.target = None;
        self.pending_note.clear();
        self.started_at = None;
    }

    /// Snapshot for subscribers and front-ends.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            is_running: self.phase != TimerPhase::Idle,
            is_paused: self.phase == TimerPhase::Paused,
            elapsed: self.elapsed,
            target: self.target,
            remaining: self.remaining(),
            progress: self.progress(),
            category: self.selected_category,
            note: self.pending_note.clone(),
            started_at: self.started_at,
        }
    }
}

/// Read-only view of the timer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: TimerPhase,
    /// A session is in progress (running or paused)
    pub is_running: bool,
    /// The session in progress is paused
    pub is_paused: bool,
    /// Elapsed seconds
    pub elapsed: u64,
    /// Target seconds
    pub target: Option<u64>,
    /// Seconds left, when a target is set
    pub remaining: Option<u64>,
    /// Progress fraction
    pub progress: f64,
    /// Selected category
    pub category: SessionCategory,
    /// Pending note
    pub note: String,
    /// Most recent start reference
    pub started_at: Option<DateTime<Utc>>,
}

/// Parse a duration string like "25m", "1h30m", "90s" into seconds.
///
/// A bare number is read as minutes. Returns `None` for zero, malformed
/// input, or totals that overflow `u64` seconds.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u64>() {
        return minutes.checked_mul(60).filter(|&seconds| seconds > 0);
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if c.is_whitespace() {
            continue;
        } else {
            if current_num.is_empty() {
                return None;
            }
            let num: u64 = current_num.parse().ok()?;
            current_num.clear();

            let seconds = match c {
                'h' => num.checked_mul(3600)?,
                'm' => num.checked_mul(60)?,
                's' => num,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(seconds)?;
        }
    }

    // Trailing number without unit is minutes
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    (total_seconds > 0).then_some(total_seconds)
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
