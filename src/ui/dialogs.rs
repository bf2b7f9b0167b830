//! Modal dialogs drawn over the planner screen
//!
//! Covers the trip details form, the new-activity form, deletion
//! confirmations and the resume prompt shown at startup.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::data::Trip;
use crate::form::{ActivityForm, DetailsForm, Form};
use crate::ui::centered_rect;

fn modal_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn key_hint(keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// One line per field, with a cursor after the focused value
fn field_lines(form: &Form) -> Vec<Line<'static>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focus;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(format!(" {:<14}", field.label), label_style),
                Span::raw(field.value.clone()),
            ];
            if focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
            }
            Line::from(spans)
        })
        .collect()
}

/// Renders the trip details form
pub fn render_details_form(frame: &mut Frame, form: &DetailsForm) {
    let area = centered_rect(60, 11, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = field_lines(&form.form);
    lines.push(Line::from(""));
    lines.push(key_hint(&[("Tab", "Next"), ("Enter", "Save"), ("Esc", "Cancel")]));

    let paragraph = Paragraph::new(lines).block(modal_block(" Trip details ", Color::Cyan));
    frame.render_widget(paragraph, area);
}

/// Renders the new-activity form
pub fn render_activity_form(frame: &mut Frame, form: &ActivityForm) {
    let area = centered_rect(60, 14, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {:<14}", "Type"), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "{} {}",
            form.activity_type.icon(),
            form.activity_type.label()
        )),
        Span::styled("  ←/→", Style::default().fg(Color::Yellow)),
    ])];
    lines.extend(field_lines(&form.form));
    lines.push(Line::from(""));
    lines.push(key_hint(&[("Tab", "Next"), ("Enter", "Add"), ("Esc", "Cancel")]));

    let title = format!(" New activity for day {} ", form.day_index + 1);
    let paragraph = Paragraph::new(lines).block(modal_block(&title, Color::Cyan));
    frame.render_widget(paragraph, area);
}

/// Renders a yes/no confirmation
pub fn render_confirm(frame: &mut Frame, prompt: &str) {
    let area = centered_rect(50, 6, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(prompt.to_string()),
        Line::from(""),
        key_hint(&[("y", "Yes"), ("n", "No")]),
    ];
    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Confirm ", Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Renders the offer to resume an autosaved trip
pub fn render_resume(frame: &mut Frame, trip: &Trip) {
    let area = centered_rect(56, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from("You have a trip in progress:"),
        Line::from(Span::styled(
            trip.display_name().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} days, {} activities",
            trip.days.len(),
            trip.activity_count()
        )),
        Line::from(""),
        key_hint(&[("y", "Resume"), ("n", "Start fresh"), ("q", "Quit")]),
    ];
    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Welcome back ", Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
