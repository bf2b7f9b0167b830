//! Command-line interface parsing for wanderplan
//!
//! With no subcommand the interactive planner screen opens. Each subcommand
//! applies one planner operation to the trip in the autosave slot, which makes
//! the planner scriptable.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::activities::ActivityType;
use crate::data::ActivityFields;
use crate::planner::{PlannerError, TripFormValues};

/// Error types for CLI argument parsing and command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified activity type is not recognized
    #[error("Invalid activity type: '{0}'. Valid types: sightseeing, food, shopping, entertainment, transport, accommodation, other")]
    InvalidActivityType(String),
    /// A date argument is not in YYYY-MM-DD form
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
    /// A time argument is not in HH:MM form
    #[error("Invalid time: '{0}'. Expected HH:MM")]
    InvalidTime(String),
    /// An amount argument is not a finite number
    #[error("Invalid amount: '{0}'. Expected a number such as 12.50")]
    InvalidAmount(String),
    /// No data directory given and none could be determined
    #[error("Could not determine a data directory; pass --data-dir")]
    NoDataDir,
    /// A day number that the current trip doesn't have
    #[error("Day {number} does not exist (trip has {days} days)")]
    NoSuchDay { number: usize, days: usize },
    /// An activity number that the day doesn't have
    #[error("Day {day} has no activity {number}")]
    NoSuchActivity { day: usize, number: usize },
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// wanderplan - Plan trips day by day from the terminal
#[derive(Parser, Debug)]
#[command(name = "wanderplan")]
#[command(about = "Plan trips day by day, save them locally and export them as text")]
#[command(version)]
pub struct Cli {
    /// Directory holding saved trips, the autosave slot and the log file
    #[arg(long, global = true, env = "WANDERPLAN_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seconds between autosaves in the planner screen
    #[arg(
        long,
        global = true,
        env = "WANDERPLAN_AUTOSAVE_SECS",
        value_name = "SECONDS",
        default_value_t = 30
    )]
    pub autosave_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One planner operation
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new trip, replacing the one in progress
    New(DetailsArgs),
    /// Print the trip in progress
    Show,
    /// Print trip duration, destination and activity counts
    Stats,
    /// Edit the trip's name, destination, dates or budget
    Details(DetailsArgs),
    /// Append a day to the trip
    AddDay,
    /// Delete a day and all of its activities
    DeleteDay {
        /// Day number as shown by `show`
        day: usize,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Add an activity to a day
    AddActivity(ActivityArgs),
    /// Delete an activity from a day
    DeleteActivity {
        /// Day number as shown by `show`
        day: usize,
        /// Activity number within the day as shown by `show`
        activity: usize,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Save the trip into the saved-trips list
    Save,
    /// List saved trips
    List,
    /// Open a saved trip, replacing the one in progress
    Load {
        /// Trip id as shown by `list`
        trip_id: String,
    },
    /// Delete a trip from the saved-trips list
    DeleteSaved {
        /// Trip id as shown by `list`
        trip_id: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the trip as a text itinerary
    Export {
        /// Directory to write into (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Print a short summary to share the trip
    Share,
}

/// Trip details; fields left out keep their current value
#[derive(Args, Debug, Default, Clone)]
pub struct DetailsArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub destination: Option<String>,
    /// First day, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,
    /// Last day, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
    #[arg(long, value_parser = parse_amount)]
    pub budget: Option<f64>,
}

impl DetailsArgs {
    /// Whether any field was given
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.destination.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.budget.is_none()
    }

    /// Overlays the given fields onto existing form values.
    pub fn apply_to(&self, mut form: TripFormValues) -> TripFormValues {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(destination) = &self.destination {
            form.destination = destination.clone();
        }
        if self.start.is_some() {
            form.start_date = self.start;
        }
        if self.end.is_some() {
            form.end_date = self.end;
        }
        if let Some(budget) = self.budget {
            form.budget = budget;
        }
        form
    }
}

/// A new activity
#[derive(Args, Debug, Clone)]
pub struct ActivityArgs {
    /// Day number as shown by `show`
    pub day: usize,
    /// What the activity is called
    #[arg(long)]
    pub name: String,
    /// sightseeing, food, shopping, entertainment, transport, accommodation or other
    #[arg(long = "type", value_parser = parse_activity_type, default_value = "sightseeing")]
    pub activity_type: ActivityType,
    /// Start time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,
    /// Duration in hours
    #[arg(long, value_parser = parse_amount, default_value_t = 0.0)]
    pub duration: f64,
    #[arg(long, value_parser = parse_amount, default_value_t = 0.0)]
    pub cost: f64,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    #[arg(long, default_value = "")]
    pub url: String,
}

impl ActivityArgs {
    /// The 0-based day index and the activity fields.
    pub fn into_fields(self) -> (usize, ActivityFields) {
        let index = self.day.saturating_sub(1);
        let fields = ActivityFields {
            name: self.name,
            activity_type: self.activity_type,
            time: self.time,
            duration: self.duration,
            cost: self.cost,
            location: self.location,
            notes: self.notes,
            url: self.url,
        };
        (index, fields)
    }
}

/// Parses an activity type argument, accepting aliases.
pub fn parse_activity_type(s: &str) -> Result<ActivityType, CliError> {
    ActivityType::from_str(s).ok_or_else(|| CliError::InvalidActivityType(s.to_string()))
}

/// Parses a YYYY-MM-DD date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an HH:MM time.
pub fn parse_time(s: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| CliError::InvalidTime(s.to_string()))
}

/// Parses a finite amount. `inf` and `NaN` are rejected since JSON can't store them.
pub fn parse_amount(s: &str) -> Result<f64, CliError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CliError::InvalidAmount(s.to_string()))
}
