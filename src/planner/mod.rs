//! Itinerary manager
//!
//! [`ItineraryManager`] owns the one current trip, applies user actions to it,
//! pushes the derived day cards and counters to its [`TripView`] and persists
//! the trip through an optional [`TripStore`].
//!
//! Every mutation re-renders the view and overwrites the autosave slot.
//! Destructive actions ask a [`Confirm`] first; a declined confirmation
//! returns `Ok(false)` and leaves the trip untouched. Ids that match nothing
//! are reported as errors, also without touching the trip.

pub mod stats;
pub mod view;

pub use stats::{compute_stats, TripStats};
pub use view::{Confirm, DetachedView, Preapproved, TripFormValues, TripView};

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::{Activity, ActivityFields, Trip};
use crate::export;
use crate::storage::{StorageError, TripStore};

/// Errors reported by planner operations
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The operation needs a current trip and there is none
    #[error("no trip is open; create or load one first")]
    NoActiveTrip,
    /// No day with the given id
    #[error("day '{0}' not found")]
    DayNotFound(String),
    /// No day at the given 0-based position
    #[error("day index {index} is out of range (trip has {days} days)")]
    DayIndexOutOfRange { index: usize, days: usize },
    /// No activity with the given id in the given day
    #[error("activity '{activity_id}' not found in day '{day_id}'")]
    ActivityNotFound { day_id: String, activity_id: String },
    /// No saved trip with the given id
    #[error("saved trip '{0}' not found")]
    SavedTripNotFound(String),
    /// The planner was created without a trip store
    #[error("trip storage is unavailable")]
    StoreUnavailable,
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Writing the export file failed
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

/// Whether the planner currently has a trip open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    /// Nothing created or loaded yet
    NoActiveTrip,
    /// A trip is open and can be edited
    ActiveTrip,
}

/// Controller for the current trip
pub struct ItineraryManager<V: TripView> {
    trip: Option<Trip>,
    view: V,
    store: Option<TripStore>,
}

impl<V: TripView> ItineraryManager<V> {
    /// Creates a planner with no open trip.
    pub fn new(view: V, store: Option<TripStore>) -> Self {
        Self {
            trip: None,
            view,
            store,
        }
    }

    pub fn state(&self) -> PlannerState {
        if self.trip.is_some() {
            PlannerState::ActiveTrip
        } else {
            PlannerState::NoActiveTrip
        }
    }

    /// The current trip, if any
    pub fn trip(&self) -> Option<&Trip> {
        self.trip.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> Option<&TripStore> {
        self.store.as_ref()
    }

    fn trip_mut(&mut self) -> Result<&mut Trip, PlannerError> {
        self.trip.as_mut().ok_or(PlannerError::NoActiveTrip)
    }

    fn active_trip(&self) -> Result<&Trip, PlannerError> {
        self.trip.as_ref().ok_or(PlannerError::NoActiveTrip)
    }

    /// Re-renders the view and writes the autosave slot.
    fn after_mutation(&mut self) {
        if let Some(trip) = &self.trip {
            render(&mut self.view, trip);
            autosave_to(self.store.as_ref(), trip);
        }
    }

    /// Makes `trip` the current trip, fills the details form and re-renders.
    fn show(&mut self, trip: Trip) -> &Trip {
        self.view.clear_empty_state();
        self.view.render_details(&trip);
        render(&mut self.view, &trip);
        self.trip.insert(trip)
    }

    /// Like [`show`](Self::show), then writes the autosave slot.
    fn install(&mut self, trip: Trip) -> &Trip {
        autosave_to(self.store.as_ref(), &trip);
        self.show(trip)
    }

    /// Replaces the current trip with a new one starting today and ending
    /// tomorrow, then gives it its first day.
    pub fn create_trip(&mut self) -> &Trip {
        self.create_trip_on(Local::now().date_naive())
    }

    /// Like [`create_trip`](Self::create_trip) with an explicit start date.
    pub fn create_trip_on(&mut self, start: NaiveDate) -> &Trip {
        let mut trip = Trip::starting_on(start, Utc::now());
        trip.push_day();
        info!(trip_id = %trip.id, "created trip");
        self.install(trip)
    }

    /// Appends a day numbered after the last one. Returns the new day's id.
    pub fn add_day(&mut self) -> Result<String, PlannerError> {
        let trip = self.trip_mut()?;
        let day = trip.push_day();
        let day_id = day.id.clone();
        debug!(day_id = %day_id, day_number = day.day_number, "added day");
        self.after_mutation();
        Ok(day_id)
    }

    /// Removes a day and its activities, then renumbers the remaining days
    /// and recomputes their dates.
    pub fn delete_day(
        &mut self,
        day_id: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, PlannerError> {
        let trip = self.trip_mut()?;
        let position = trip
            .day_position(day_id)
            .ok_or_else(|| PlannerError::DayNotFound(day_id.to_string()))?;

        let prompt = format!(
            "Delete day {} and all of its activities?",
            trip.days[position].day_number
        );
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        trip.days.remove(position);
        trip.renumber_days();
        info!(day_id, remaining = trip.days.len(), "deleted day");
        self.after_mutation();
        Ok(true)
    }

    /// Appends an activity to the day at `day_index` (0-based). Returns the
    /// new activity's id.
    pub fn add_activity(
        &mut self,
        day_index: usize,
        fields: ActivityFields,
    ) -> Result<String, PlannerError> {
        let trip = self.trip_mut()?;
        let days = trip.days.len();
        let day = trip
            .days
            .get_mut(day_index)
            .ok_or(PlannerError::DayIndexOutOfRange { index: day_index, days })?;

        let activity = Activity::from_fields(fields);
        let activity_id = activity.id.clone();
        debug!(
            activity_id = %activity_id,
            day_number = day.day_number,
            kind = %activity.activity_type,
            "added activity"
        );
        day.activities.push(activity);
        self.after_mutation();
        Ok(activity_id)
    }

    /// Removes an activity from a day.
    pub fn delete_activity(
        &mut self,
        day_id: &str,
        activity_id: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, PlannerError> {
        let trip = self.trip_mut()?;
        let day_position = trip
            .day_position(day_id)
            .ok_or_else(|| PlannerError::DayNotFound(day_id.to_string()))?;
        let day = &mut trip.days[day_position];
        let position =
            day.activity_position(activity_id)
                .ok_or_else(|| PlannerError::ActivityNotFound {
                    day_id: day_id.to_string(),
                    activity_id: activity_id.to_string(),
                })?;

        let prompt = format!("Delete \"{}\"?", day.activities[position].name);
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        day.activities.remove(position);
        debug!(day_id, activity_id, "deleted activity");
        self.after_mutation();
        Ok(true)
    }

    /// Copies the details form into the trip and re-dates every day from the
    /// (possibly new) start date.
    ///
    /// Returns `Ok(false)` when the view has no form to read.
    pub fn update_trip_details(&mut self) -> Result<bool, PlannerError> {
        self.active_trip()?;
        let Some(form) = self.view.read_trip_form() else {
            return Ok(false);
        };

        let trip = self.trip_mut()?;
        trip.name = form.name;
        trip.destination = form.destination;
        trip.start_date = form.start_date;
        trip.end_date = form.end_date;
        trip.budget = form.budget;
        trip.updated_at = Utc::now();
        trip.renumber_days();
        info!(trip_id = %trip.id, "updated trip details");
        self.after_mutation();
        Ok(true)
    }

    /// Stats for the current trip; all zero when no trip is open.
    pub fn compute_stats(&self) -> TripStats {
        self.trip.as_ref().map(compute_stats).unwrap_or_default()
    }

    /// Inserts or replaces the current trip in the saved-trips list.
    pub fn save_trip(&self) -> Result<(), PlannerError> {
        let trip = self.active_trip()?;
        let store = self.store.as_ref().ok_or(PlannerError::StoreUnavailable)?;
        store.upsert_saved_trip(trip)?;
        info!(trip_id = %trip.id, name = %trip.display_name(), "saved trip");
        Ok(())
    }

    /// Overwrites the autosave slot with the current trip.
    ///
    /// Does nothing without a trip or a store. Failures are logged, never
    /// returned, so a full disk can't interrupt editing.
    pub fn auto_save(&self) {
        if let Some(trip) = &self.trip {
            autosave_to(self.store.as_ref(), trip);
        }
    }

    /// Replaces the current trip wholesale and re-renders everything.
    pub fn load_trip(&mut self, trip: Trip) -> &Trip {
        info!(trip_id = %trip.id, "loaded trip");
        self.install(trip)
    }

    /// Makes the trip read from the autosave slot current without rewriting
    /// the slot.
    pub fn resume_trip(&mut self, trip: Trip) -> &Trip {
        debug!(trip_id = %trip.id, "resumed trip");
        self.show(trip)
    }

    /// Trips in the saved-trips list; empty without a store.
    pub fn saved_trips(&self) -> Vec<Trip> {
        self.store
            .as_ref()
            .map(TripStore::saved_trips)
            .unwrap_or_default()
    }

    /// Loads a trip from the saved-trips list by id.
    pub fn open_saved_trip(&mut self, trip_id: &str) -> Result<(), PlannerError> {
        let store = self.store.as_ref().ok_or(PlannerError::StoreUnavailable)?;
        let trip = store
            .find_saved_trip(trip_id)
            .ok_or_else(|| PlannerError::SavedTripNotFound(trip_id.to_string()))?;
        self.load_trip(trip);
        Ok(())
    }

    /// Removes a trip from the saved-trips list. The current trip is unaffected.
    pub fn delete_saved_trip(
        &self,
        trip_id: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, PlannerError> {
        let store = self.store.as_ref().ok_or(PlannerError::StoreUnavailable)?;
        let trip = store
            .find_saved_trip(trip_id)
            .ok_or_else(|| PlannerError::SavedTripNotFound(trip_id.to_string()))?;

        let prompt = format!("Delete saved trip \"{}\"?", trip.display_name());
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }
        if !store.delete_saved_trip(trip_id)? {
            return Err(PlannerError::SavedTripNotFound(trip_id.to_string()));
        }
        info!(trip_id, "deleted saved trip");
        Ok(true)
    }

    /// Writes the text outline of the current trip into `dir`.
    pub fn export_trip(&self, dir: &Path) -> Result<PathBuf, PlannerError> {
        let trip = self.active_trip()?;
        let path = export::write_export(trip, dir)?;
        info!(trip_id = %trip.id, path = %path.display(), "exported trip");
        Ok(path)
    }

    /// Share text for the current trip.
    pub fn share_summary(&self) -> Result<String, PlannerError> {
        Ok(export::share_summary(self.active_trip()?))
    }
}

fn render<V: TripView>(view: &mut V, trip: &Trip) {
    view.render_days(&trip.days);
    view.render_stats(&compute_stats(trip));
}

fn autosave_to(store: Option<&TripStore>, trip: &Trip) {
    let Some(store) = store else {
        return;
    };
    match store.write_current_trip(trip) {
        Ok(()) => debug!(trip_id = %trip.id, "autosaved trip"),
        Err(err) => warn!(trip_id = %trip.id, %err, "autosave failed"),
    }
}
