//! Aggregate statistics over recorded sessions.
//!
//! Every function is pure: it takes the session list and, where calendar days
//! matter, the reference time to measure from. Days are local calendar days.

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::features::focus::{FocusSession, SessionCategory};

/// Sum of all durations, in seconds.
#[must_use]
pub fn total_focus_time(sessions: &[FocusSession]) -> f64 {
    sessions.iter().map(|s| s.duration).sum()
}

/// Sessions recorded on the local calendar day of `now`.
#[must_use]
pub fn sessions_today(sessions: &[FocusSession], now: DateTime<Local>) -> Vec<&FocusSession> {
    let today = now.date_naive();
    sessions
        .iter()
        .filter(|s| s.date_local().date_naive() == today)
        .collect()
}

/// Seconds focused today.
#[must_use]
pub fn today_focus_time(sessions: &[FocusSession], now: DateTime<Local>) -> f64 {
    sessions_today(sessions, now).iter().map(|s| s.duration).sum()
}

/// Seconds focused since `now - 7 days` (inclusive).
#[must_use]
pub fn week_focus_time(sessions: &[FocusSession], now: DateTime<Local>) -> f64 {
    let week_ago = now - Duration::days(7);
    sessions
        .iter()
        .filter(|s| s.date_local() >= week_ago)
        .map(|s| s.duration)
        .sum()
}

/// Mean session length in seconds, 0 when there are no sessions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_session_duration(sessions: &[FocusSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    total_focus_time(sessions) / sessions.len() as f64
}

/// Seconds per category, largest first.
///
/// Categories without sessions are omitted. Equal totals keep category
/// enumeration order.
#[must_use]
pub fn sessions_by_category(sessions: &[FocusSession]) -> Vec<(SessionCategory, f64)> {
    let mut totals = [0.0_f64; SessionCategory::ALL.len()];
    let mut seen = [false; SessionCategory::ALL.len()];

    for session in sessions {
        let i = session.category.index();
        totals[i] += session.duration;
        seen[i] = true;
    }

    let mut by_category: Vec<(SessionCategory, f64)> = SessionCategory::ALL
        .into_iter()
        .filter(|c| seen[c.index()])
        .map(|c| (c, totals[c.index()]))
        .collect();

    // Stable sort, so ties stay in enumeration order
    by_category.sort_by(|a, b| b.1.total_cmp(&a.1));
    by_category
}

/// Seconds per local calendar day, most recent day first.
#[must_use]
pub fn sessions_by_day(sessions: &[FocusSession]) -> Vec<(NaiveDate, f64)> {
    let mut by_day: Vec<(NaiveDate, f64)> = Vec::new();

    for session in sessions {
        let day = session.date_local().date_naive();
        match by_day.iter_mut().find(|(d, _)| *d == day) {
            Some(entry) => entry.1 += session.duration,
            None => by_day.push((day, session.duration)),
        }
    }

    by_day.sort_by(|a, b| b.0.cmp(&a.0));
    by_day
}

/// Consecutive days with at least one session, counting back from `today`.
///
/// Returns 0 when `today` itself has no session.
#[must_use]
pub fn calculate_streak(sessions: &[FocusSession], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = sessions
        .iter()
        .map(|s| s.date_local().date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();

    let mut streak = 0;
    let mut check_date = today;

    while days.binary_search(&check_date).is_ok() {
        streak += 1;
        match check_date.pred_opt() {
            Some(previous) => check_date = previous,
            None => break,
        }
    }

    streak
}

/// Fraction of `total` taken by `duration`, 0 when `total` is 0.
#[must_use]
pub fn category_share(duration: f64, total: f64) -> f64 {
    if total > 0.0 {
        duration / total
    } else {
        0.0
    }
}

/// Progress of today's focus time toward a goal in minutes, clamped to 0..=1.
#[must_use]
pub fn daily_goal_progress(today_seconds: f64, goal_minutes: u32) -> f64 {
    if goal_minutes == 0 {
        return 0.0;
    }
    (today_seconds / (f64::from(goal_minutes) * 60.0)).clamp(0.0, 1.0)
}

/// Focus time per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFocusTime {
    /// Category
    pub category: SessionCategory,
    /// Total seconds
    pub seconds: f64,
    /// Share of all focus time (0.0 - 1.0)
    pub share: f64,
}

/// Focus time per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFocusTime {
    /// Local calendar day
    pub date: NaiveDate,
    /// Total seconds
    pub seconds: f64,
}

/// All statistics at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusStats {
    /// Number of recorded sessions
    pub session_count: usize,
    /// Sessions recorded today
    pub sessions_today: usize,
    /// Seconds across all sessions
    pub total_seconds: f64,
    /// Seconds today
    pub today_seconds: f64,
    /// Seconds in the trailing seven days
    pub week_seconds: f64,
    /// Mean session length in seconds
    pub average_seconds: f64,
    /// Consecutive days with focus time, ending today
    pub streak_days: u32,
    /// Per-category totals, largest first
    pub by_category: Vec<CategoryFocusTime>,
    /// The seven most recent days with focus time, most recent first
    pub recent_days: Vec<DailyFocusTime>,
}

impl FocusStats {
    /// Compute statistics for `sessions` as of `now`.
    #[must_use]
    pub fn compute(sessions: &[FocusSession], now: DateTime<Local>) -> Self {
        let total_seconds = total_focus_time(sessions);

        let by_category = sessions_by_category(sessions)
            .into_iter()
            .map(|(category, seconds)| CategoryFocusTime {
                category,
                seconds,
                share: category_share(seconds, total_seconds),
            })
            .collect();

        let recent_days = sessions_by_day(sessions)
            .into_iter()
            .take(7)
            .map(|(date, seconds)| DailyFocusTime { date, seconds })
            .collect();

        Self {
            session_count: sessions.len(),
            sessions_today: sessions_today(sessions, now).len(),
            total_seconds,
            today_seconds: today_focus_time(sessions, now),
            week_seconds: week_focus_time(sessions, now),
            average_seconds: average_session_duration(sessions),
            streak_days: calculate_streak(sessions, now.date_naive()),
            by_category,
            recent_days,
        }
    }

    /// The category with the most focus time.
    #[must_use]
    pub fn top_category(&self) -> Option<&CategoryFocusTime> {
        self.by_category.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn session_days_ago(days: i64, duration: f64, category: SessionCategory) -> FocusSession {
        let day = Local::now().date_naive() - Duration::days(days);
        let noon = day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        let local = Local.from_local_datetime(&noon).earliest().unwrap();
        FocusSession::with_date(duration, category, None, local.with_timezone(&Utc))
    }

    fn session_now(duration: f64, category: SessionCategory) -> FocusSession {
        FocusSession::with_date(duration, category, None, Utc::now())
    }

    #[test]
    fn test_empty_sessions() {
        let stats = FocusStats::compute(&[], Local::now());

        assert_eq!(stats.session_count, 0);
        assert!(stats.total_seconds.abs() < f64::EPSILON);
        assert!(stats.average_seconds.abs() < f64::EPSILON);
        assert_eq!(stats.streak_days, 0);
        assert!(stats.top_category().is_none());
    }

    #[test]
    fn test_totals_and_average() {
        let sessions = vec![
            session_now(100.0, SessionCategory::Work),
            session_now(200.0, SessionCategory::Work),
            session_days_ago(40, 300.0, SessionCategory::Other),
        ];

        assert!((total_focus_time(&sessions) - 600.0).abs() < f64::EPSILON);
        assert!((average_session_duration(&sessions) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_week_today_and_category_example() {
        let now = Local::now();
        let sessions = vec![
            session_now(1500.0, SessionCategory::Work),
            session_days_ago(6, 600.0, SessionCategory::Reading),
        ];

        assert!((week_focus_time(&sessions, now) - 2100.0).abs() < f64::EPSILON);
        assert!((today_focus_time(&sessions, now) - 1500.0).abs() < f64::EPSILON);
        assert_eq!(
            sessions_by_category(&sessions),
            vec![(SessionCategory::Work, 1500.0), (SessionCategory::Reading, 600.0)]
        );
    }

    #[test]
    fn test_week_excludes_older_sessions() {
        let now = Local::now();
        let sessions = vec![session_days_ago(9, 600.0, SessionCategory::Work)];
        assert!(week_focus_time(&sessions, now).abs() < f64::EPSILON);
    }

    #[test]
    fn test_category_ties_follow_enumeration_order() {
        let sessions = vec![
            session_now(300.0, SessionCategory::Other),
            session_now(300.0, SessionCategory::Study),
            session_now(300.0, SessionCategory::Work),
        ];

        let categories: Vec<_> = sessions_by_category(&sessions).into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            categories,
            vec![SessionCategory::Work, SessionCategory::Study, SessionCategory::Other]
        );
    }

    #[test]
    fn test_sessions_by_day_most_recent_first() {
        let sessions = vec![
            session_days_ago(2, 60.0, SessionCategory::Work),
            session_days_ago(0, 30.0, SessionCategory::Work),
            session_days_ago(2, 40.0, SessionCategory::Study),
        ];

        let by_day = sessions_by_day(&sessions);
        let today = Local::now().date_naive();

        assert_eq!(by_day.len(), 2);
        assert_eq!(by_day[0].0, today);
        assert_eq!(by_day[1].0, today - Duration::days(2));
        assert!((by_day[1].1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_streak_three_days() {
        let today = Local::now().date_naive();
        let sessions = vec![
            session_days_ago(0, 60.0, SessionCategory::Work),
            session_days_ago(1, 60.0, SessionCategory::Work),
            session_days_ago(1, 60.0, SessionCategory::Study),
            session_days_ago(2, 60.0, SessionCategory::Work),
            session_days_ago(4, 60.0, SessionCategory::Work),
        ];

        assert_eq!(calculate_streak(&sessions, today), 3);
    }

    #[test]
    fn test_streak_zero_without_session_today() {
        let today = Local::now().date_naive();
        let sessions = vec![
            session_days_ago(1, 60.0, SessionCategory::Work),
            session_days_ago(2, 60.0, SessionCategory::Work),
        ];

        assert_eq!(calculate_streak(&sessions, today), 0);
    }

    #[test]
    fn test_category_share_and_goal_progress() {
        assert!((category_share(30.0, 120.0) - 0.25).abs() < f64::EPSILON);
        assert!(category_share(30.0, 0.0).abs() < f64::EPSILON);

        assert!((daily_goal_progress(3600.0, 120) - 0.5).abs() < f64::EPSILON);
        assert!((daily_goal_progress(99_999.0, 30) - 1.0).abs() < f64::EPSILON);
        assert!(daily_goal_progress(100.0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compute_bundles_everything() {
        let now = Local::now();
        let sessions = vec![
            session_now(1500.0, SessionCategory::Work),
            session_days_ago(1, 600.0, SessionCategory::Reading),
        ];

        let stats = FocusStats::compute(&sessions, now);

        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.sessions_today, 1);
        assert_eq!(stats.streak_days, 2);
        assert_eq!(stats.recent_days.len(), 2);
        let top = stats.top_category().unwrap();
        assert_eq!(top.category, SessionCategory::Work);
        assert!((top.share - 1500.0 / 2100.0).abs() < 1e-9);
    }
}
