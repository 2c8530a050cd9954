//! History filtering and day grouping for display.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::session::FocusSession;

/// Which sessions a history view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    /// Everything
    #[default]
    All,
    /// Sessions from the current calendar day
    Today,
    /// Sessions from the trailing seven days
    Week,
}

impl HistoryFilter {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Today => "Today",
            Self::Week => "This Week",
        }
    }

    /// Whether `session` passes this filter at `now`.
    #[must_use]
    pub fn matches(&self, session: &FocusSession, now: DateTime<Local>) -> bool {
        match self {
            Self::All => true,
            Self::Today => session.date_local().date_naive() == now.date_naive(),
            Self::Week => session.date_local() >= now - Duration::days(7),
        }
    }

    /// Sessions passing this filter, in store order.
    #[must_use]
    pub fn apply<'a>(&self, sessions: &'a [FocusSession], now: DateTime<Local>) -> Vec<&'a FocusSession> {
        sessions.iter().filter(|s| self.matches(s, now)).collect()
    }
}

/// Sessions recorded on one calendar day.
#[derive(Debug, Clone)]
pub struct DayGroup<'a> {
    /// Local calendar day
    pub day: NaiveDate,
    /// Header shown above the group
    pub label: String,
    /// Sessions, newest first
    pub sessions: Vec<&'a FocusSession>,
}

/// Group sessions by local day, most recent day first.
#[must_use]
pub fn group_by_day<'a>(sessions: &[&'a FocusSession], now: DateTime<Local>) -> Vec<DayGroup<'a>> {
    let mut groups: Vec<DayGroup<'a>> = Vec::new();

    for &session in sessions {
        let day = session.date_local().date_naive();
        match groups.iter_mut().find(|g| g.day == day) {
            Some(group) => group.sessions.push(session),
            None => groups.push(DayGroup {
                day,
                label: day_label(day, now.date_naive()),
                sessions: vec![session],
            }),
        }
    }

    groups.sort_by(|a, b| b.day.cmp(&a.day));
    for group in &mut groups {
        group.sessions.sort_by(|a, b| b.date.cmp(&a.date));
    }
    groups
}

/// Header for a day: "Today", "Yesterday", a weekday in the current week, or
/// a medium date.
#[must_use]
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(day) {
        return "Yesterday".to_string();
    }
    if day.iso_week() == today.iso_week() {
        return day.format("%A").to_string();
    }
    day.format("%b %-d, %Y").to_string()
}
