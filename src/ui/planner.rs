//! Planner screen rendering
//!
//! Renders the trip header, the stats bar, the day cards with their
//! activities and the footer with key hints or the latest status message.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Activity, Day};
use crate::planner::{TripFormValues, TripStats};
use crate::ui::widgets::BudgetBar;

/// Renders the full planner screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Stats
            Constraint::Min(5),    // Days
            Constraint::Length(1), // Footer
        ])
        .split(area);

    if app.view().has_trip {
        render_header(frame, chunks[0], &app.view().details);
        render_stats(frame, chunks[1], &app.view().stats);
        render_days(frame, chunks[2], app);
    } else {
        let empty_area = chunks[0].union(chunks[2]);
        render_empty_state(frame, empty_area);
    }
    render_footer(frame, chunks[3], app);
}

/// Placeholder shown before any trip is created or opened
fn render_empty_state(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No trip planned yet",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press n to start a new trip or o to open a saved one."),
    ];
    let block = Block::default()
        .title(" Wanderplan ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, area: Rect, details: &TripFormValues) {
    let name = if details.name.trim().is_empty() {
        "Untitled trip"
    } else {
        details.name.trim()
    };
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| "TBD".to_string())
    };

    let mut spans = vec![Span::styled(
        name.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if !details.destination.trim().is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("\u{1F4CD} {}", details.destination.trim()),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        format!(
            "  {} to {}",
            date(details.start_date),
            date(details.end_date)
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &TripStats) {
    let block = Block::default()
        .title(" Stats ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let mut spans = vec![
        Span::styled(stats.duration_days.to_string(), value),
        Span::styled(" days  ", label),
        Span::styled(stats.destinations.to_string(), value),
        Span::styled(" places  ", label),
        Span::styled(stats.total_activities.to_string(), value),
        Span::styled(" activities  ", label),
        Span::styled(format!("${:.2}", stats.planned_cost), value),
        Span::styled(" planned", label),
    ];
    if stats.budget > 0.0 {
        let remaining = stats.remaining_budget();
        let color = if remaining < 0.0 {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(" of ", label));
        spans.push(Span::styled(format!("${:.2}", stats.budget), value));
        spans.push(Span::styled(
            format!("  ({:+.2} left) ", remaining),
            Style::default().fg(color),
        ));
    }

    let text = Line::from(spans);
    let text_width = text.width() as u16;
    frame.render_widget(Paragraph::new(text), inner);

    if stats.budget > 0.0 && inner.width > text_width + 2 {
        let bar_area = Rect {
            x: inner.x + text_width + 1,
            width: inner.width - text_width - 1,
            ..inner
        };
        frame.render_widget(BudgetBar::new(stats.planned_cost, stats.budget), bar_area);
    }
}

fn activity_line(activity: &Activity, is_selected: bool) -> Line<'static> {
    let time = activity
        .time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let name_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if is_selected { "   • " } else { "     " };

    let mut spans = vec![
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
        Span::styled(time, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(activity.activity_type.icon()),
        Span::raw(" "),
        Span::styled(activity.name.clone(), name_style),
    ];
    if activity.cost > 0.0 {
        spans.push(Span::styled(
            format!("  ${:.2}", activity.cost),
            Style::default().fg(Color::Green),
        ));
    }
    if !activity.location.trim().is_empty() {
        spans.push(Span::styled(
            format!("  @ {}", activity.location.trim()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Builds the lines of all day cards; returns them with the line index of
/// the selected day's heading.
fn day_lines(days: &[Day], selected_day: usize, selected_activity: usize) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_line = 0;

    for (i, day) in days.iter().enumerate() {
        let is_selected = i == selected_day;
        if is_selected {
            selected_line = lines.len();
        }
        let (cursor, heading_style) = if is_selected {
            (
                " ▸ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("   ", Style::default().add_modifier(Modifier::BOLD))
        };
        let mut heading = vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(format!("Day {}", day.day_number), heading_style),
        ];
        if let Some(date) = day.date {
            heading.push(Span::styled(
                format!("  {}", date.format("%a, %b %-d")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(heading));

        if day.activities.is_empty() {
            lines.push(Line::from(Span::styled(
                "     No activities planned",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (j, activity) in day.activities.iter().enumerate() {
            lines.push(activity_line(activity, is_selected && j == selected_activity));
        }
        lines.push(Line::from(""));
    }

    (lines, selected_line)
}

fn render_days(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Itinerary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let visible = block.inner(area).height as usize;

    let (lines, selected_line) =
        day_lines(&app.view().days, app.selected_day, app.selected_activity);
    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "   No days yet. Press + to add one.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines
    };
    let scroll = if selected_line + 2 > visible {
        selected_line.saturating_sub(visible / 3)
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Renders the status message, or key hints when there is none
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(vec![
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(" New  "),
            Span::styled("+", Style::default().fg(Color::Yellow)),
            Span::raw(" Day  "),
            Span::styled("a", Style::default().fg(Color::Yellow)),
            Span::raw(" Activity  "),
            Span::styled("s", Style::default().fg(Color::Yellow)),
            Span::raw(" Save  "),
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::raw(" Open  "),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" Help  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    };
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
