//! Insights generation from statistics.
//!
//! Short, encouraging observations shown under the statistics summary.

use serde::{Deserialize, Serialize};

use super::metrics::FocusStats;
use crate::features::focus::format_short;

/// Kind of insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// The category with the most focus time
    TopCategory,
    /// Consecutive days of focus
    Streak,
    /// Sessions completed today
    TodayProgress,
}

impl InsightKind {
    /// Get icon for this kind.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::TopCategory => "★",
            Self::Streak => "🔥",
            Self::TodayProgress => "✔",
        }
    }
}

/// An observation about recent focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// What the insight is about
    pub kind: InsightKind,
    /// Short title
    pub title: String,
    /// Description
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
        }
    }
}

/// Generate insights from computed statistics.
#[must_use]
pub fn generate_insights(stats: &FocusStats) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(top) = stats.top_category() {
        insights.push(Insight::new(
            InsightKind::TopCategory,
            "Top Category",
            format!(
                "{} {} with {}",
                top.category.glyph(),
                top.category.label(),
                format_short(top.seconds)
            ),
        ));
    }

    if stats.session_count >= 3 && stats.streak_days > 1 {
        insights.push(Insight::new(
            InsightKind::Streak,
            "Focus Streak",
            format!("{} days in a row!", stats.streak_days),
        ));
    }

    if stats.sessions_today > 0 {
        let n = stats.sessions_today;
        insights.push(Insight::new(
            InsightKind::TodayProgress,
            "Today's Progress",
            format!("Completed {n} session{}", if n == 1 { "" } else { "s" }),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::SessionCategory;
    use crate::features::stats::metrics::CategoryFocusTime;

    fn stats(session_count: usize, streak_days: u32, sessions_today: usize) -> FocusStats {
        FocusStats {
            session_count,
            sessions_today,
            total_seconds: 3000.0,
            today_seconds: 1500.0,
            week_seconds: 3000.0,
            average_seconds: 1000.0,
            streak_days,
            by_category: vec![CategoryFocusTime {
                category: SessionCategory::Coding,
                seconds: 3000.0,
                share: 1.0,
            }],
            recent_days: vec![],
        }
    }

    #[test]
    fn test_all_insights() {
        let insights = generate_insights(&stats(3, 2, 1));

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].kind, InsightKind::TopCategory);
        assert_eq!(insights[0].message, "💻 Coding with 50m");
        assert_eq!(insights[1].message, "2 days in a row!");
        assert_eq!(insights[2].message, "Completed 1 session");
    }

    #[test]
    fn test_streak_needs_three_sessions() {
        let insights = generate_insights(&stats(2, 2, 2));

        assert!(insights.iter().all(|i| i.kind != InsightKind::Streak));
        assert_eq!(insights.last().unwrap().message, "Completed 2 sessions");
    }

    #[test]
    fn test_single_day_streak_is_not_shown() {
        let insights = generate_insights(&stats(5, 1, 0));
        assert_eq!(insights.len(), 1);
    }
}
