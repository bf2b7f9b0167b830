//! UI rendering module for the trip planner
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod dialogs;
pub mod help_overlay;
pub mod planner;
pub mod saved_trips;
pub mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, AppState};

/// Renders the UI based on the current application state
pub fn render(frame: &mut Frame, app: &App) {
    planner::render(frame, app);

    match &app.state {
        AppState::Planner => {}
        AppState::ResumePrompt(trip) => dialogs::render_resume(frame, trip),
        AppState::EditDetails(form) => dialogs::render_details_form(frame, form),
        AppState::AddActivity(form) => dialogs::render_activity_form(frame, form),
        AppState::Confirm { prompt, .. } => dialogs::render_confirm(frame, prompt),
        AppState::SavedTrips => saved_trips::render(frame, app),
    }

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
