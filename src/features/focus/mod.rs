//! Focus sessions and the timer that produces them.
//!
//! - Categorized, immutable session records
//! - Session store persisted after every change
//! - Timer state machine with cancellable ticks
//! - Presets and history views

pub mod category;
pub mod engine;
pub mod events;
pub mod history;
pub mod preset;
pub mod session;
pub mod store;
pub mod timer;

pub use category::SessionCategory;
pub use engine::{FocusEngine, TickOutcome};
pub use events::{EngineEvent, SubscriptionId};
pub use history::{group_by_day, DayGroup, HistoryFilter};
pub use preset::FocusPreset;
pub use session::{format_clock, format_short, FocusSession};
pub use store::SessionStore;
pub use timer::{
    parse_duration, render_progress_bar, TickHandle, TimerPhase, TimerSnapshot,
    TimerState,
};
