use colored::Colorize;

use crate::features::focus::{
    format_short, render_progress_bar, DayGroup, FocusPreset, FocusSession, HistoryFilter,
};
use crate::features::stats::{daily_goal_progress, FocusStats, Insight};

/// Format grouped sessions as a pretty listing
pub fn format_history_pretty(groups: &[DayGroup<'_>], filter: HistoryFilter) -> String {
    let count: usize = groups.iter().map(|g| g.sessions.len()).sum();
    let title = format!("History: {}", filter.display_name());

    if count == 0 {
        return format!(
            "{} (0 sessions)\n  No sessions yet. Start one with: focusflow start",
            title
        );
    }

    let mut output = format!("{} ({} sessions)\n", title.bold(), count);
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for group in groups {
        let total: f64 = group.sessions.iter().map(|s| s.duration).sum();
        output.push_str(&format!(
            "\n{}  {}\n",
            group.label.bold(),
            format_short(total).dimmed()
        ));

        for session in &group.sessions {
            output.push_str(&format_session_line(session));
            output.push('\n');
        }
    }

    output
}

/// One history row: time, category, duration, id and note.
fn format_session_line(session: &FocusSession) -> String {
    let mut line = format!(
        "  {}  {} {:<11} {}  {}",
        session.date_local().format("%H:%M"),
        session.category.glyph(),
        session.category.label(),
        format!("{:>8}", session.formatted_duration()).green(),
        session.short_id().dimmed()
    );

    if let Some(note) = &session.note {
        line.push_str(&format!("  {}", note.italic()));
    }

    line
}

/// Format a single session with all fields
pub fn format_session_pretty(session: &FocusSession) -> String {
    let mut output = format!(
        "{} {}\n",
        session.category.glyph(),
        session.category.label().bold()
    );
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), session.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Duration".dimmed(),
        session.formatted_duration()
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Recorded".dimmed(),
        session.date_local().format("%Y-%m-%d %H:%M")
    ));

    if let Some(note) = &session.note {
        output.push_str(&format!("  {}: {}\n", "Note".dimmed(), note));
    }

    output
}

/// Format statistics with goal progress and insights
pub fn format_stats_pretty(stats: &FocusStats, insights: &[Insight], goal_minutes: u32) -> String {
    let mut output = Vec::new();

    output.push("🎯 Focus Statistics".bold().to_string());
    output.push("═".repeat(50));
    output.push(String::new());

    output.push(format!(
        "Today:      {} ({} sessions)",
        format_short(stats.today_seconds),
        stats.sessions_today
    ));
    output.push(format!("This week:  {}", format_short(stats.week_seconds)));
    output.push(format!(
        "All time:   {} ({} sessions)",
        format_short(stats.total_seconds),
        stats.session_count
    ));
    output.push(format!("Average:    {}", format_short(stats.average_seconds)));

    let streak = match stats.streak_days {
        0 => "none".dimmed().to_string(),
        1 => "1 day".to_string(),
        n => format!("{n} days").yellow().to_string(),
    };
    output.push(format!("Streak:     {streak}"));

    output.push(String::new());
    let progress = daily_goal_progress(stats.today_seconds, goal_minutes);
    output.push(format!(
        "Daily goal: {} {} of {}",
        render_progress_bar(progress, 20),
        format_short(stats.today_seconds),
        format_short(f64::from(goal_minutes) * 60.0)
    ));

    if !stats.by_category.is_empty() {
        output.push(String::new());
        output.push("By Category:".bold().to_string());
        for entry in &stats.by_category {
            output.push(format!(
                "  {} {:<11} {:>8}  {:>3.0}%",
                entry.category.glyph(),
                entry.category.label(),
                format_short(entry.seconds),
                entry.share * 100.0
            ));
        }
    }

    if !stats.recent_days.is_empty() {
        output.push(String::new());
        output.push("Recent Days:".bold().to_string());
        for day in &stats.recent_days {
            output.push(format!(
                "  {}  {}",
                day.date.format("%a %b %-d"),
                format_short(day.seconds)
            ));
        }
    }

    if !insights.is_empty() {
        output.push(String::new());
        output.push("Insights:".bold().to_string());
        for insight in insights {
            output.push(format!(
                "  {} {}: {}",
                insight.kind.icon(),
                insight.title.cyan(),
                insight.message
            ));
        }
    }

    output.join("\n")
}

/// Format presets as a table
pub fn format_presets_pretty(presets: &[FocusPreset]) -> String {
    let mut output = format!("Presets ({})\n", presets.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for preset in presets {
        output.push_str(&format!(
            "{} {} {:>6}  {:<11} {}\n",
            preset.category.glyph(),
            format!("{:<12}", preset.name).bold(),
            format_short(preset.duration as f64),
            preset.category.label(),
            format!("--preset {}", preset.slug()).dimmed()
        ));
    }

    output
}
