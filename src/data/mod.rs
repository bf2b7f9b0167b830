//! Core itinerary data models
//!
//! A [`Trip`] owns an ordered list of [`Day`]s, and each day owns an ordered
//! list of [`Activity`] entries. These are the documents persisted by the
//! trip store and rendered by the planner screen.

mod ids;

pub use ids::next_id;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activities::ActivityType;

/// A planned trip with its day-by-day itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Opaque identifier derived from the creation timestamp
    pub id: String,
    /// Display name, e.g. "Paris Getaway"
    #[serde(default)]
    pub name: String,
    /// Where the trip goes
    #[serde(default)]
    pub destination: String,
    /// First day of the trip
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the trip
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Total budget in the user's currency
    #[serde(default)]
    pub budget: f64,
    /// Ordered days; numbers always run 1..N
    #[serde(default)]
    pub days: Vec<Day>,
    /// When the trip was created
    pub created_at: DateTime<Utc>,
    /// When the trip details were last edited
    pub updated_at: DateTime<Utc>,
}

/// One calendar day of a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Opaque identifier
    pub id: String,
    /// 1-based position within the trip
    pub day_number: usize,
    /// Calendar date, absent while the trip has no start date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Activities in the order they were added
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// A single planned event within a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Opaque identifier
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Duration in hours
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub url: String,
}

/// Field values for a new activity, as entered in a form or on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFields {
    pub name: String,
    pub activity_type: ActivityType,
    pub time: Option<NaiveTime>,
    pub duration: f64,
    pub cost: f64,
    pub location: String,
    pub notes: String,
    pub url: String,
}

impl ActivityFields {
    /// Creates fields with just a name and type; everything else defaults.
    pub fn named(name: impl Into<String>, activity_type: ActivityType) -> Self {
        Self {
            name: name.into(),
            activity_type,
            ..Self::default()
        }
    }
}

impl Activity {
    /// Builds an activity from form fields with a fresh id.
    pub fn from_fields(fields: ActivityFields) -> Self {
        Self {
            id: next_id(Utc::now()),
            name: fields.name,
            activity_type: fields.activity_type,
            time: fields.time,
            duration: fields.duration,
            cost: fields.cost,
            location: fields.location,
            notes: fields.notes,
            url: fields.url,
        }
    }
}

/// Returns the calendar date of day `number` (1-based) of a trip starting on `start`.
///
/// `None` when the trip has no start date or the date would overflow.
pub fn day_date(start: Option<NaiveDate>, number: usize) -> Option<NaiveDate> {
    let offset = number.checked_sub(1)? as u64;
    start?.checked_add_days(Days::new(offset))
}

impl Trip {
    /// Creates an empty trip (no days) running from `start` to the following day.
    pub fn starting_on(start: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: next_id(now),
            name: String::new(),
            destination: String::new(),
            start_date: Some(start),
            end_date: start.succ_opt(),
            budget: 0.0,
            days: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a new empty day and returns a reference to it.
    pub fn push_day(&mut self) -> &Day {
        let number = self.days.len() + 1;
        self.days.push(Day {
            id: next_id(Utc::now()),
            day_number: number,
            date: day_date(self.start_date, number),
            activities: Vec::new(),
        });
        &self.days[number - 1]
    }

    /// Renumbers days to 1..N in their current order and recomputes their dates.
    pub fn renumber_days(&mut self) {
        let start = self.start_date;
        for (index, day) in self.days.iter_mut().enumerate() {
            day.day_number = index + 1;
            day.date = day_date(start, day.day_number);
        }
    }

    /// Finds the position of a day by id.
    pub fn day_position(&self, day_id: &str) -> Option<usize> {
        self.days.iter().position(|d| d.id == day_id)
    }

    /// Total number of activities across all days.
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// Whether the budget and every activity's cost and duration are finite.
    ///
    /// JSON has no representation for infinities or NaN.
    pub fn has_finite_amounts(&self) -> bool {
        self.budget.is_finite()
            && self
                .days
                .iter()
                .flat_map(|d| d.activities.iter())
                .all(|a| a.cost.is_finite() && a.duration.is_finite())
    }

    /// Name to show for the trip, falling back when it has none.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Untitled trip"
        } else {
            self.name.trim()
        }
    }
}

impl Day {
    /// Finds the position of an activity by id.
    pub fn activity_position(&self, activity_id: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.id == activity_id)
    }

    /// Sum of the costs of this day's activities.
    pub fn planned_cost(&self) -> f64 {
        self.activities.iter().map(|a| a.cost).sum()
    }
}
