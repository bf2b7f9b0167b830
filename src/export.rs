//! Plain-text itinerary export and share summary
//!
//! The outline is one-way: it is meant for reading and printing, and there is
//! no parser that turns it back into a trip.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::data::{Activity, Trip};

/// Separator printed above and below each day heading
const DAY_SEPARATOR_WIDTH: usize = 50;

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "TBD".to_string())
}

fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn write_activity(out: &mut String, activity: &Activity) {
    let time = activity
        .time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let _ = writeln!(
        out,
        "  {} {} ({})",
        time,
        activity.name,
        activity.activity_type.label()
    );

    let mut details = Vec::new();
    if activity.duration > 0.0 {
        details.push(format!("Duration: {}h", activity.duration));
    }
    if activity.cost > 0.0 {
        details.push(format!("Cost: {}", format_amount(activity.cost)));
    }
    if !activity.location.trim().is_empty() {
        details.push(format!("Location: {}", activity.location.trim()));
    }
    if !details.is_empty() {
        let _ = writeln!(out, "        {}", details.join(" | "));
    }
    if !activity.notes.trim().is_empty() {
        let _ = writeln!(out, "        Notes: {}", activity.notes.trim());
    }
    if !activity.url.trim().is_empty() {
        let _ = writeln!(out, "        Link: {}", activity.url.trim());
    }
}

/// Renders the trip as a human-readable text outline.
pub fn render_outline(trip: &Trip) -> String {
    let separator = "=".repeat(DAY_SEPARATOR_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", trip.display_name());
    if !trip.destination.trim().is_empty() {
        let _ = writeln!(out, "Destination: {}", trip.destination.trim());
    }
    let _ = writeln!(
        out,
        "Dates: {} to {}",
        format_date(trip.start_date),
        format_date(trip.end_date)
    );
    if trip.budget > 0.0 {
        let _ = writeln!(out, "Budget: {}", format_amount(trip.budget));
    }
    out.push('\n');

    for day in &trip.days {
        let _ = writeln!(out, "{}", separator);
        let _ = writeln!(out, "DAY {} - {}", day.day_number, format_date(day.date));
        let _ = writeln!(out, "{}", separator);
        if day.activities.is_empty() {
            out.push_str("  No activities planned\n");
        }
        for activity in &day.activities {
            write_activity(&mut out, activity);
        }
        out.push('\n');
    }

    out
}

/// File name for an exported trip: `<name>-itinerary.txt`, or `trip-itinerary.txt`
/// when the trip has no name. Path separators in the name are replaced.
pub fn export_file_name(trip: &Trip) -> String {
    let name = trip.name.trim();
    let stem = if name.is_empty() {
        "trip".to_string()
    } else {
        name.replace(['/', '\\'], "-")
    };
    format!("{}-itinerary.txt", stem)
}

/// Writes the outline into `dir` and returns the path of the new file.
pub fn write_export(trip: &Trip, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(trip));
    fs::write(&path, render_outline(trip))?;
    Ok(path)
}

/// Short summary of the trip for pasting into a message.
pub fn share_summary(trip: &Trip) -> String {
    let activities = trip.activity_count();
    let mut summary = format!("Check out my trip \"{}\"", trip.display_name());
    if !trip.destination.trim().is_empty() {
        let _ = write!(summary, " to {}", trip.destination.trim());
    }
    if let (Some(start), Some(end)) = (trip.start_date, trip.end_date) {
        let _ = write!(
            summary,
            " from {} to {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        );
    }
    let _ = write!(
        summary,
        ": {} day{} and {} planned activit{}.",
        trip.days.len(),
        if trip.days.len() == 1 { "" } else { "s" },
        activities,
        if activities == 1 { "y" } else { "ies" }
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::ActivityType;
    use crate::data::ActivityFields;
    use chrono::{NaiveTime, Utc};
    use tempfile::TempDir;

    fn paris_trip() -> Trip {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut trip = Trip::starting_on(start, Utc::now());
        trip.name = "Paris Getaway".to_string();
        trip.destination = "Paris".to_string();
        trip.budget = 1500.0;
        trip.push_day();
        let mut fields = ActivityFields::named("Eiffel Tower", ActivityType::Sightseeing);
        fields.time = NaiveTime::from_hms_opt(9, 0, 0);
        fields.duration = 2.0;
        fields.cost = 28.3;
        fields.location = "Champ de Mars".to_string();
        trip.days[0].activities.push(Activity::from_fields(fields));
        trip
    }

    #[test]
    fn test_outline_contains_day_heading_and_activity() {
        let outline = render_outline(&paris_trip());

        assert!(outline.starts_with("Paris Getaway\n"));
        assert!(outline.contains("Destination: Paris"));
        assert!(outline.contains("Dates: 2025-01-01 to 2025-01-02"));
        assert!(outline.contains("DAY 1 - 2025-01-01"));
        assert!(outline.contains("09:00 Eiffel Tower (Sightseeing)"));
        assert!(outline.contains("Duration: 2h | Cost: $28.30 | Location: Champ de Mars"));
    }

    #[test]
    fn test_outline_day_separator_is_fifty_equals() {
        let outline = render_outline(&paris_trip());
        let separator = "=".repeat(50);
        assert!(outline.lines().any(|line| line == separator));
        assert!(!outline.contains(&"=".repeat(51)));
    }

    #[test]
    fn test_outline_marks_empty_days() {
        let mut trip = paris_trip();
        trip.push_day();
        let outline = render_outline(&trip);
        assert!(outline.contains("DAY 2 - 2025-01-02"));
        assert!(outline.contains("No activities planned"));
    }

    #[test]
    fn test_export_file_name_uses_trip_name() {
        assert_eq!(export_file_name(&paris_trip()), "Paris Getaway-itinerary.txt");
    }

    #[test]
    fn test_export_file_name_falls_back_to_trip() {
        let mut trip = paris_trip();
        trip.name = "   ".to_string();
        assert_eq!(export_file_name(&trip), "trip-itinerary.txt");
    }

    #[test]
    fn test_export_file_name_replaces_separators() {
        let mut trip = paris_trip();
        trip.name = "Rome/Naples".to_string();
        assert_eq!(export_file_name(&trip), "Rome-Naples-itinerary.txt");
    }

    #[test]
    fn test_write_export_creates_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_export(&paris_trip(), temp_dir.path()).expect("Export should succeed");

        assert_eq!(path, temp_dir.path().join("Paris Getaway-itinerary.txt"));
        let content = fs::read_to_string(path).expect("Should read export");
        assert!(content.contains("DAY 1"));
        assert!(content.contains("Eiffel Tower"));
    }

    #[test]
    fn test_share_summary_mentions_counts() {
        let summary = share_summary(&paris_trip());
        assert_eq!(
            summary,
            "Check out my trip \"Paris Getaway\" to Paris from Jan 1, 2025 to Jan 2, 2025: 1 day and 1 planned activity."
        );
    }
}
