//! Saved trips picker

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::centered_rect;

/// Renders the saved-trips list over the planner
pub fn render(frame: &mut Frame, app: &App) {
    let height = (app.saved_trips.len() as u16).clamp(1, 12) + 4;
    let area = centered_rect(64, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    if app.saved_trips.is_empty() {
        lines.push(Line::from(Span::styled(
            " No saved trips yet. Press s on a trip to save it.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, trip) in app.saved_trips.iter().enumerate() {
        let is_selected = i == app.saved_index;
        let (cursor, name_style) = if is_selected {
            (
                " ▸ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("   ", Style::default().fg(Color::White))
        };
        let mut spans = vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{:<24}", trip.display_name()), name_style),
        ];
        if !trip.destination.trim().is_empty() {
            spans.push(Span::styled(
                format!(" {}", trip.destination.trim()),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            format!("  {} days", trip.days.len()),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Open  "),
        Span::styled("Del", Style::default().fg(Color::Yellow)),
        Span::raw(" Delete  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back"),
    ]));

    let block = Block::default()
        .title(" Saved trips ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
