//! Derived trip statistics
//!
//! Stats are recomputed from the trip on every change and never stored.

use std::collections::HashSet;

use crate::data::Trip;

/// Counters shown in the planner's stats bar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripStats {
    /// Inclusive number of calendar days between start and end date
    pub duration_days: i64,
    /// Distinct non-empty activity locations
    pub destinations: usize,
    /// Activities across all days
    pub total_activities: usize,
    /// Sum of all activity costs
    pub planned_cost: f64,
    /// The trip's budget
    pub budget: f64,
}

impl TripStats {
    /// Budget left after planned costs; negative when over budget.
    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.planned_cost
    }
}

/// Computes the stats for a trip.
///
/// Duration is `end - start + 1` days, or 0 when either date is missing or
/// the end lies before the start.
pub fn compute_stats(trip: &Trip) -> TripStats {
    let duration_days = match (trip.start_date, trip.end_date) {
        // An end before the start counts as no days rather than a negative span
        (Some(start), Some(end)) => ((end - start).num_days() + 1).max(0),
        _ => 0,
    };

    let destinations: HashSet<&str> = trip
        .days
        .iter()
        .flat_map(|d| d.activities.iter())
        .map(|a| a.location.trim())
        .filter(|l| !l.is_empty())
        .collect();

    TripStats {
        duration_days,
        destinations: destinations.len(),
        total_activities: trip.activity_count(),
        planned_cost: trip.days.iter().map(|d| d.planned_cost()).sum(),
        budget: trip.budget,
    }
}
