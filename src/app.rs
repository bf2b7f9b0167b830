//! Application state for the planner screen
//!
//! This module holds the interactive state around the itinerary manager:
//! which screen or dialog is open, the current selection, status messages and
//! the autosave timer. Keyboard input is translated into planner operations.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::data::{Day, Trip};
use crate::form::{ActivityForm, DetailsForm};
use crate::planner::{
    Confirm, ItineraryManager, PlannerError, PlannerState, Preapproved, TripFormValues, TripStats,
    TripView,
};
use crate::storage::TripStore;

/// What the user is being asked to confirm
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDeletion {
    Day { day_id: String },
    Activity { day_id: String, activity_id: String },
    SavedTrip { trip_id: String },
}

/// Application state enum representing the current screen or dialog
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Day cards of the current trip (or the empty placeholder)
    Planner,
    /// An autosaved trip was found at startup
    ResumePrompt(Box<Trip>),
    /// Editing name, destination, dates and budget
    EditDetails(DetailsForm),
    /// Entering a new activity
    AddActivity(ActivityForm),
    /// Yes/no modal before a deletion
    Confirm {
        prompt: String,
        action: PendingDeletion,
    },
    /// Picker over the saved-trips list
    SavedTrips,
}

/// View state the itinerary manager renders into; the ui module draws it
#[derive(Debug, Clone, Default)]
pub struct ScreenView {
    pub days: Vec<Day>,
    pub stats: TripStats,
    pub details: TripFormValues,
    /// False until a trip is created or loaded
    pub has_trip: bool,
    /// Submitted details form, read by the manager
    pub submitted_form: Option<TripFormValues>,
}

impl TripView for ScreenView {
    fn render_days(&mut self, days: &[Day]) {
        self.days = days.to_vec();
    }

    fn render_stats(&mut self, stats: &TripStats) {
        self.stats = stats.clone();
    }

    fn render_details(&mut self, trip: &Trip) {
        self.details = TripFormValues::from_trip(trip);
    }

    fn clear_empty_state(&mut self) {
        self.has_trip = true;
    }

    fn read_trip_form(&self) -> Option<TripFormValues> {
        self.submitted_form.clone()
    }
}

/// Captures the manager's confirmation prompt without approving it
#[derive(Default)]
struct AskLater {
    prompt: Option<String>,
}

impl Confirm for AskLater {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompt = Some(prompt.to_string());
        false
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current screen or dialog
    pub state: AppState,
    pub planner: ItineraryManager<ScreenView>,
    /// Index of the selected day card
    pub selected_day: usize,
    /// Index of the selected activity within the selected day
    pub selected_activity: usize,
    /// Saved trips shown by the picker
    pub saved_trips: Vec<Trip>,
    /// Index of the highlighted saved trip
    pub saved_index: usize,
    /// One-line message in the footer
    pub status: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Where exports are written
    pub export_dir: PathBuf,
    autosave_interval: Duration,
    last_autosave: Instant,
}

impl App {
    /// Creates the app; offers to resume when the store holds an autosaved trip.
    pub fn new(store: Option<TripStore>, autosave_interval: Duration, export_dir: PathBuf) -> Self {
        let resume = store.as_ref().and_then(TripStore::current_trip);
        let state = match resume {
            Some(trip) => AppState::ResumePrompt(Box::new(trip)),
            None => AppState::Planner,
        };
        Self {
            state,
            planner: ItineraryManager::new(ScreenView::default(), store),
            selected_day: 0,
            selected_activity: 0,
            saved_trips: Vec::new(),
            saved_index: 0,
            status: None,
            show_help: false,
            should_quit: false,
            export_dir,
            autosave_interval,
            last_autosave: Instant::now(),
        }
    }

    pub fn view(&self) -> &ScreenView {
        self.planner.view()
    }

    pub fn has_trip(&self) -> bool {
        self.planner.state() == PlannerState::ActiveTrip
    }

    /// The selected day card, if any
    pub fn selected_day(&self) -> Option<&Day> {
        self.view().days.get(self.selected_day)
    }

    /// Runs the periodic autosave when the interval has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if now.duration_since(self.last_autosave) >= self.autosave_interval {
            self.planner.auto_save();
            self.last_autosave = now;
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn report(&mut self, err: PlannerError) {
        warn!(%err, "planner operation failed");
        self.set_status(err.to_string());
    }

    /// Keeps the selection inside the current days and activities.
    fn clamp_selection(&mut self) {
        let days = self.view().days.len();
        self.selected_day = self.selected_day.min(days.saturating_sub(1));
        let activities = self.selected_day().map(|d| d.activities.len()).unwrap_or(0);
        self.selected_activity = self.selected_activity.min(activities.saturating_sub(1));
    }

    /// Handles a keyboard event based on current state
    ///
    /// Planner keys:
    /// - `n`: New trip, `e`: edit details, `+`: add day, `a`: add activity
    /// - `d`: delete selected day, `x`: delete selected activity
    /// - `j`/`k`: select day, `J`/`K`: select activity
    /// - `s`: save, `o`: open saved trips, `E`: export, `S`: share summary
    /// - `?`: help, `q`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        let state = std::mem::replace(&mut self.state, AppState::Planner);
        self.state = match state {
            AppState::Planner => {
                self.handle_planner_key(key_event);
                return;
            }
            AppState::ResumePrompt(trip) => match key_event.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.planner.resume_trip(*trip);
                    self.set_status("Resumed your trip in progress");
                    AppState::Planner
                }
                KeyCode::Char('n') | KeyCode::Esc => AppState::Planner,
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    AppState::ResumePrompt(trip)
                }
                _ => AppState::ResumePrompt(trip),
            },
            AppState::EditDetails(form) => self.handle_details_key(form, key_event),
            AppState::AddActivity(form) => self.handle_activity_key(form, key_event),
            AppState::Confirm { prompt, action } => match key_event.code {
                KeyCode::Char('y') => self.apply_deletion(action),
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.set_status("Cancelled");
                    return_state(&action)
                }
                _ => AppState::Confirm { prompt, action },
            },
            AppState::SavedTrips => self.handle_saved_trips_key(key_event),
        };
        self.clamp_selection();
    }

    fn handle_planner_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('n') => {
                self.planner.create_trip();
                self.selected_day = 0;
                self.selected_activity = 0;
                self.set_status("Started a new trip");
            }
            KeyCode::Char('o') => self.open_saved_trips(),
            _ if !self.has_trip() => self.set_status("Press n to start a trip or o to open one"),
            KeyCode::Char('e') => {
                self.state = AppState::EditDetails(DetailsForm::from_values(&self.view().details));
            }
            KeyCode::Char('+') => match self.planner.add_day() {
                Ok(_) => {
                    self.selected_day = self.view().days.len().saturating_sub(1);
                    self.selected_activity = 0;
                }
                Err(err) => self.report(err),
            },
            KeyCode::Char('a') => {
                if self.selected_day().is_some() {
                    self.state = AppState::AddActivity(ActivityForm::new(self.selected_day));
                } else {
                    self.set_status("Add a day first");
                }
            }
            KeyCode::Char('d') => {
                if let Some(day_id) = self.selected_day().map(|d| d.id.clone()) {
                    if let Some(state) = self.ask(PendingDeletion::Day { day_id }) {
                        self.state = state;
                    }
                }
            }
            KeyCode::Char('x') => {
                let target = self.selected_day().and_then(|d| {
                    d.activities
                        .get(self.selected_activity)
                        .map(|a| (d.id.clone(), a.id.clone()))
                });
                if let Some((day_id, activity_id)) = target {
                    let action = PendingDeletion::Activity {
                        day_id,
                        activity_id,
                    };
                    if let Some(state) = self.ask(action) {
                        self.state = state;
                    }
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let days = self.view().days.len();
                if days > 0 {
                    self.selected_day = (self.selected_day + 1) % days;
                    self.selected_activity = 0;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let days = self.view().days.len();
                if days > 0 {
                    self.selected_day = (self.selected_day + days - 1) % days;
                    self.selected_activity = 0;
                }
            }
            KeyCode::Char('J') => {
                let count = self.selected_day().map(|d| d.activities.len()).unwrap_or(0);
                if count > 0 {
                    self.selected_activity = (self.selected_activity + 1) % count;
                }
            }
            KeyCode::Char('K') => {
                let count = self.selected_day().map(|d| d.activities.len()).unwrap_or(0);
                if count > 0 {
                    self.selected_activity = (self.selected_activity + count - 1) % count;
                }
            }
            KeyCode::Char('s') => match self.planner.save_trip() {
                Ok(()) => self.set_status("Trip saved"),
                Err(err) => self.report(err),
            },
            KeyCode::Char('E') => match self.planner.export_trip(&self.export_dir) {
                Ok(path) => self.set_status(format!("Exported to {}", path.display())),
                Err(err) => self.report(err),
            },
            KeyCode::Char('S') => match self.planner.share_summary() {
                Ok(summary) => self.set_status(summary),
                Err(err) => self.report(err),
            },
            _ => {}
        }
        self.clamp_selection();
    }

    fn handle_details_key(&mut self, mut form: DetailsForm, key_event: KeyEvent) -> AppState {
        match key_event.code {
            KeyCode::Esc => return AppState::Planner,
            KeyCode::Enter => match form.to_values() {
                Ok(values) => {
                    self.planner.view_mut().submitted_form = Some(values);
                    let result = self.planner.update_trip_details();
                    self.planner.view_mut().submitted_form = None;
                    match result {
                        Ok(_) => self.set_status("Trip details updated"),
                        Err(err) => self.report(err),
                    }
                    return AppState::Planner;
                }
                Err(message) => self.set_status(message),
            },
            KeyCode::Tab | KeyCode::Down => form.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.form.focus_prev(),
            KeyCode::Backspace => form.form.backspace(),
            KeyCode::Char(c) => form.form.insert(c),
            _ => {}
        }
        AppState::EditDetails(form)
    }

    fn handle_activity_key(&mut self, mut form: ActivityForm, key_event: KeyEvent) -> AppState {
        match key_event.code {
            KeyCode::Esc => return AppState::Planner,
            KeyCode::Enter => match form.to_fields() {
                Ok(fields) => {
                    let name = fields.name.clone();
                    match self.planner.add_activity(form.day_index, fields) {
                        Ok(_) => {
                            self.selected_activity = self
                                .selected_day()
                                .map(|d| d.activities.len().saturating_sub(1))
                                .unwrap_or(0);
                            self.set_status(format!("Added \"{}\"", name));
                        }
                        Err(err) => self.report(err),
                    }
                    return AppState::Planner;
                }
                Err(message) => self.set_status(message),
            },
            KeyCode::Tab | KeyCode::Down => form.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.form.focus_prev(),
            KeyCode::Left | KeyCode::Right => form.cycle_type(),
            KeyCode::Backspace => form.form.backspace(),
            KeyCode::Char(c) => form.form.insert(c),
            _ => {}
        }
        AppState::AddActivity(form)
    }

    fn handle_saved_trips_key(&mut self, key_event: KeyEvent) -> AppState {
        let count = self.saved_trips.len();
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppState::Planner,
            KeyCode::Char('j') | KeyCode::Down if count > 0 => {
                self.saved_index = (self.saved_index + 1) % count;
            }
            KeyCode::Char('k') | KeyCode::Up if count > 0 => {
                self.saved_index = (self.saved_index + count - 1) % count;
            }
            KeyCode::Enter => {
                if let Some(trip) = self.saved_trips.get(self.saved_index).cloned() {
                    let name = trip.display_name().to_string();
                    self.planner.load_trip(trip);
                    self.selected_day = 0;
                    self.selected_activity = 0;
                    self.set_status(format!("Opened {}", name));
                    return AppState::Planner;
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(trip_id) = self.saved_trips.get(self.saved_index).map(|t| t.id.clone()) {
                    if let Some(state) = self.ask(PendingDeletion::SavedTrip { trip_id }) {
                        return state;
                    }
                }
            }
            _ => {}
        }
        AppState::SavedTrips
    }

    fn open_saved_trips(&mut self) {
        self.saved_trips = self.planner.saved_trips();
        self.saved_index = 0;
        self.state = AppState::SavedTrips;
    }

    /// Asks the manager for the deletion's prompt without applying it.
    /// Returns the confirmation modal to show, if any.
    fn ask(&mut self, action: PendingDeletion) -> Option<AppState> {
        let mut ask = AskLater::default();
        let result = match &action {
            PendingDeletion::Day { day_id } => self.planner.delete_day(day_id, &mut ask),
            PendingDeletion::Activity {
                day_id,
                activity_id,
            } => self.planner.delete_activity(day_id, activity_id, &mut ask),
            PendingDeletion::SavedTrip { trip_id } => {
                self.planner.delete_saved_trip(trip_id, &mut ask)
            }
        };
        match (result, ask.prompt) {
            (Err(err), _) => {
                self.report(err);
                None
            }
            (Ok(_), prompt) => prompt.map(|prompt| AppState::Confirm { prompt, action }),
        }
    }

    fn apply_deletion(&mut self, action: PendingDeletion) -> AppState {
        let result = match &action {
            PendingDeletion::Day { day_id } => self.planner.delete_day(day_id, &mut Preapproved),
            PendingDeletion::Activity {
                day_id,
                activity_id,
            } => self
                .planner
                .delete_activity(day_id, activity_id, &mut Preapproved),
            PendingDeletion::SavedTrip { trip_id } => {
                self.planner.delete_saved_trip(trip_id, &mut Preapproved)
            }
        };
        match result {
            Ok(_) => self.set_status("Deleted"),
            Err(err) => self.report(err),
        }
        if let PendingDeletion::SavedTrip { .. } = action {
            self.saved_trips = self.planner.saved_trips();
            self.saved_index = self.saved_index.min(self.saved_trips.len().saturating_sub(1));
        }
        return_state(&action)
    }
}

/// Screen to go back to once a deletion is settled
fn return_state(action: &PendingDeletion) -> AppState {
    match action {
        PendingDeletion::SavedTrip { .. } => AppState::SavedTrips,
        _ => AppState::Planner,
    }
}
