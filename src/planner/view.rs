//! Collaborators the itinerary manager talks to
//!
//! The manager never draws anything itself. It pushes day cards, counters and
//! trip details into a [`TripView`] and asks a [`Confirm`] implementation
//! before destroying anything.

use chrono::NaiveDate;

use super::stats::TripStats;
use crate::data::{Day, Trip};

/// Editable trip details as they appear in the details form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFormValues {
    pub name: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: f64,
}

impl TripFormValues {
    /// Form values pre-filled from an existing trip.
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            name: trip.name.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            budget: trip.budget,
        }
    }
}

/// Presentation side of the planner
pub trait TripView {
    /// Replaces the rendered day cards.
    fn render_days(&mut self, days: &[Day]);

    /// Replaces the rendered stat counters.
    fn render_stats(&mut self, stats: &TripStats);

    /// Fills the details form from the trip.
    fn render_details(&mut self, trip: &Trip);

    /// Hides the "no trip yet" placeholder.
    fn clear_empty_state(&mut self);

    /// Reads the details form; `None` when no form is available.
    fn read_trip_form(&self) -> Option<TripFormValues>;
}

/// Yes/no confirmation for destructive actions
pub trait Confirm {
    /// Returns `true` to proceed with the action described by `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirmation already given elsewhere (a modal answered "yes", or `--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Preapproved;

impl Confirm for Preapproved {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// A view with no screen behind it
///
/// Keeps the last rendered state so callers can print or inspect it, and
/// serves form values set by the caller. Used by the command-line front end.
#[derive(Debug, Clone, Default)]
pub struct DetachedView {
    /// Form values to hand to the manager on the next details update
    pub form: Option<TripFormValues>,
    pub days: Vec<Day>,
    pub stats: TripStats,
    pub details: Option<TripFormValues>,
    pub empty_state: bool,
}

impl DetachedView {
    pub fn new() -> Self {
        Self {
            empty_state: true,
            ..Self::default()
        }
    }
}

impl TripView for DetachedView {
    fn render_days(&mut self, days: &[Day]) {
        self.days = days.to_vec();
    }

    fn render_stats(&mut self, stats: &TripStats) {
        self.stats = stats.clone();
    }

    fn render_details(&mut self, trip: &Trip) {
        self.details = Some(TripFormValues::from_trip(trip));
    }

    fn clear_empty_state(&mut self) {
        self.empty_state = false;
    }

    fn read_trip_form(&self) -> Option<TripFormValues> {
        self.form.clone()
    }
}
