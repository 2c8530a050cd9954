//! UI rendering for the timer screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{format_clock, format_short, SessionCategory, TimerPhase};
use crate::tui::app::{App, KEY_HELP};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Clock
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Category
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_clock(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_categories(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        render_help(frame);
    }
}

fn phase_color(phase: TimerPhase) -> Color {
    match phase {
        TimerPhase::Running => Color::Green,
        TimerPhase::Paused => Color::Yellow,
        TimerPhase::Idle => Color::DarkGray,
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let title = format!(
        " focusflow · {} · today {} ",
        snapshot.phase,
        format_short(app.today_seconds())
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the elapsed time and note.
fn render_clock(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let color = phase_color(snapshot.phase);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format_clock(snapshot.elapsed),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    match snapshot.phase {
        TimerPhase::Paused => lines.push(Line::from(Span::styled(
            "paused",
            Style::default().fg(Color::Yellow),
        ))),
        TimerPhase::Idle => lines.push(Line::from(Span::styled(
            "press space to start",
            Style::default().fg(Color::DarkGray),
        ))),
        TimerPhase::Running => lines.push(Line::from("")),
    }

    if !snapshot.note.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            snapshot.note.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    let clock = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(clock, area);
}

/// Render progress toward the target, or the stopwatch marker.
fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = app.snapshot();

    let Some(remaining) = snapshot.remaining else {
        let stopwatch = Paragraph::new("stopwatch · no target")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Progress "));
        frame.render_widget(stopwatch, area);
        return;
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(phase_color(snapshot.phase)))
        .ratio(snapshot.progress.clamp(0.0, 1.0))
        .label(format!(
            "{:.0}% · {} left",
            snapshot.progress * 100.0,
            format_clock(remaining)
        ));

    frame.render_widget(gauge, area);
}

/// Render the category selector.
fn render_categories(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selected = app.snapshot().category;

    let spans: Vec<Span<'_>> = SessionCategory::ALL
        .iter()
        .map(|category| {
            let text = format!(" {} {} ", category.glyph(), category.label());
            if *category == selected {
                Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(text, Style::default().fg(Color::Gray))
            }
        })
        .collect();

    let categories = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Category "));

    frame.render_widget(categories, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(KEY_HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Render the help overlay.
fn render_help(frame: &mut Frame<'_>) {
    let area = centered(frame.area(), 44, 10);
    let lines = vec![
        Line::from("space, p   pause / resume / start"),
        Line::from("s          stop and save"),
        Line::from("c, →       next category"),
        Line::from("C, ←       previous category"),
        Line::from("q, Esc     save and quit"),
        Line::from("Ctrl+C     save and quit"),
        Line::from("?          close help"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
