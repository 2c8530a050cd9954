//! Focus statistics.
//!
//! Provides:
//! - Totals for today, the trailing week and all time
//! - Category and per-day breakdowns
//! - Streak tracking
//! - Insights for the statistics screen

pub mod insights;
pub mod metrics;

pub use insights::{generate_insights, Insight, InsightKind};
pub use metrics::{
    average_session_duration, calculate_streak, category_share, daily_goal_progress,
    sessions_by_category, sessions_by_day, sessions_today, today_focus_time, total_focus_time,
    week_focus_time, CategoryFocusTime, DailyFocusTime, FocusStats,
};
