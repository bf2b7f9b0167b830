//! Subcommand execution
//!
//! Every subcommand resumes the trip in the autosave slot (if any), applies
//! one planner operation and lets the planner autosave the result.

use std::env;
use std::io::{self, BufRead, Write};

use crate::cli::{CliError, Command, DetailsArgs};
use crate::config::Settings;
use crate::data::Trip;
use crate::planner::{
    Confirm, DetachedView, ItineraryManager, PlannerError, Preapproved, TripFormValues,
    TripStats,
};

/// Asks for confirmation on stderr and reads the answer from stdin
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

type Planner = ItineraryManager<DetachedView>;

/// Runs one subcommand, writing its report to `out`.
///
/// `confirm` answers deletion prompts unless the command was given `--yes`.
pub fn run(
    command: Command,
    settings: &Settings,
    out: &mut dyn Write,
    confirm: &mut dyn Confirm,
) -> Result<(), CliError> {
    let mut approved = Preapproved;
    let mut planner = ItineraryManager::new(DetachedView::new(), Some(settings.store()));
    if let Some(trip) = planner.store().and_then(|s| s.current_trip()) {
        planner.resume_trip(trip);
    }

    match command {
        Command::New(details) => {
            planner.create_trip();
            if !details.is_empty() {
                apply_details(&mut planner, &details)?;
            }
            let trip = active(&planner)?;
            writeln!(out, "Started trip {} ({})", trip.display_name(), trip.id)?;
        }
        Command::Show => print_trip(out, active(&planner)?)?,
        Command::Stats => {
            active(&planner)?;
            print_stats(out, &planner.compute_stats())?;
        }
        Command::Details(details) => {
            apply_details(&mut planner, &details)?;
            print_trip(out, active(&planner)?)?;
        }
        Command::AddDay => {
            planner.add_day()?;
            let days = active(&planner)?.days.len();
            writeln!(out, "Added day {}", days)?;
        }
        Command::DeleteDay { day, yes } => {
            let day_id = day_id_for(active(&planner)?, day)?;
            let confirm: &mut dyn Confirm = if yes { &mut approved } else { confirm };
            if planner.delete_day(&day_id, confirm)? {
                writeln!(out, "Deleted day {}", day)?;
            } else {
                writeln!(out, "Cancelled")?;
            }
        }
        Command::AddActivity(args) => {
            let day = args.day;
            let (index, fields) = args.into_fields();
            let trip = active(&planner)?;
            if day == 0 || day > trip.days.len() {
                return Err(CliError::NoSuchDay {
                    number: day,
                    days: trip.days.len(),
                });
            }
            let name = fields.name.clone();
            planner.add_activity(index, fields)?;
            writeln!(out, "Added \"{}\" to day {}", name, day)?;
        }
        Command::DeleteActivity { day, activity, yes } => {
            let trip = active(&planner)?;
            let day_id = day_id_for(trip, day)?;
            let activity_id = trip.days[day - 1]
                .activities
                .get(activity.wrapping_sub(1))
                .map(|a| a.id.clone())
                .ok_or(CliError::NoSuchActivity {
                    day,
                    number: activity,
                })?;
            let confirm: &mut dyn Confirm = if yes { &mut approved } else { confirm };
            if planner.delete_activity(&day_id, &activity_id, confirm)? {
                writeln!(out, "Deleted activity {} from day {}", activity, day)?;
            } else {
                writeln!(out, "Cancelled")?;
            }
        }
        Command::Save => {
            planner.save_trip()?;
            let trip = active(&planner)?;
            writeln!(out, "Saved {} ({})", trip.display_name(), trip.id)?;
        }
        Command::List => {
            let trips = planner.saved_trips();
            if trips.is_empty() {
                writeln!(out, "No saved trips")?;
            }
            for trip in trips {
                writeln!(
                    out,
                    "{}  {}  {} days  {}",
                    trip.id,
                    trip.display_name(),
                    trip.days.len(),
                    trip.destination
                )?;
            }
        }
        Command::Load { trip_id } => {
            planner.open_saved_trip(&trip_id)?;
            writeln!(out, "Opened {}", active(&planner)?.display_name())?;
        }
        Command::DeleteSaved { trip_id, yes } => {
            let confirm: &mut dyn Confirm = if yes { &mut approved } else { confirm };
            if planner.delete_saved_trip(&trip_id, confirm)? {
                writeln!(out, "Deleted saved trip {}", trip_id)?;
            } else {
                writeln!(out, "Cancelled")?;
            }
        }
        Command::Export { out: dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let path = planner.export_trip(&dir)?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        Command::Share => writeln!(out, "{}", planner.share_summary()?)?,
    }
    Ok(())
}

fn active(planner: &Planner) -> Result<&Trip, CliError> {
    planner
        .trip()
        .ok_or(CliError::Planner(PlannerError::NoActiveTrip))
}

fn day_id_for(trip: &Trip, number: usize) -> Result<String, CliError> {
    trip.days
        .get(number.wrapping_sub(1))
        .map(|d| d.id.clone())
        .ok_or(CliError::NoSuchDay {
            number,
            days: trip.days.len(),
        })
}

fn apply_details(planner: &mut Planner, details: &DetailsArgs) -> Result<(), CliError> {
    let form = details.apply_to(TripFormValues::from_trip(active(planner)?));
    planner.view_mut().form = Some(form);
    planner.update_trip_details()?;
    Ok(())
}

fn print_stats(out: &mut dyn Write, stats: &TripStats) -> io::Result<()> {
    writeln!(out, "Duration:     {} days", stats.duration_days)?;
    writeln!(out, "Destinations: {}", stats.destinations)?;
    writeln!(out, "Activities:   {}", stats.total_activities)?;
    writeln!(out, "Planned cost: ${:.2}", stats.planned_cost)?;
    writeln!(out, "Budget left:  ${:.2}", stats.remaining_budget())
}

fn print_trip(out: &mut dyn Write, trip: &Trip) -> io::Result<()> {
    writeln!(out, "{} ({})", trip.display_name(), trip.id)?;
    if !trip.destination.is_empty() {
        writeln!(out, "Destination: {}", trip.destination)?;
    }
    let fmt_date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "unset".to_string())
    };
    writeln!(
        out,
        "Dates: {} to {}  Budget: ${:.2}",
        fmt_date(trip.start_date),
        fmt_date(trip.end_date),
        trip.budget
    )?;
    for day in &trip.days {
        writeln!(out, "Day {}  {}", day.day_number, fmt_date(day.date))?;
        for (i, activity) in day.activities.iter().enumerate() {
            let time = activity
                .time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string());
            writeln!(
                out,
                "  {}. {} {} [{}]",
                i + 1,
                time,
                activity.name,
                activity.activity_type
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ActivityArgs;
    use crate::activities::ActivityType;
    use chrono::NaiveDate;
    use std::time::Duration;
    use tempfile::TempDir;

    fn settings() -> (Settings, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let settings = Settings {
            data_dir: temp_dir.path().to_path_buf(),
            autosave_interval: Duration::from_secs(30),
        };
        (settings, temp_dir)
    }

    fn exec(settings: &Settings, command: Command) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(command, settings, &mut out, &mut |_: &str| false)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn activity(day: usize, name: &str) -> Command {
        Command::AddActivity(ActivityArgs {
            day,
            name: name.to_string(),
            activity_type: ActivityType::Sightseeing,
            time: None,
            duration: 0.0,
            cost: 0.0,
            location: String::new(),
            notes: String::new(),
            url: String::new(),
        })
    }

    #[test]
    fn test_commands_build_trip_across_invocations() {
        let (settings, _temp_dir) = settings();
        exec(&settings, Command::New(DetailsArgs::default())).unwrap();
        exec(&settings, Command::AddDay).unwrap();
        exec(&settings, activity(2, "Museum")).unwrap();

        let trip = settings.store().current_trip().expect("autosave present");
        assert_eq!(trip.days.len(), 2);
        assert_eq!(trip.days[1].activities[0].name, "Museum");
    }

    #[test]
    fn test_show_without_trip_fails() {
        let (settings, _temp_dir) = settings();
        let err = exec(&settings, Command::Show).unwrap_err();
        assert!(err.to_string().contains("no trip is open"));
    }

    #[test]
    fn test_new_with_details_sets_fields() {
        let (settings, _temp_dir) = settings();
        let details = DetailsArgs {
            name: Some("Paris Getaway".to_string()),
            start: NaiveDate::from_ymd_opt(2025, 1, 1),
            end: NaiveDate::from_ymd_opt(2025, 1, 4),
            ..DetailsArgs::default()
        };
        let output = exec(&settings, Command::New(details)).unwrap();
        assert!(output.starts_with("Started trip Paris Getaway"));

        let stats = exec(&settings, Command::Stats).unwrap();
        assert!(stats.contains("Duration:     4 days"));
    }

    #[test]
    fn test_read_only_commands_leave_autosave_untouched() {
        let (settings, temp_dir) = settings();
        let path = temp_dir.path().join("currentTrip.json");
        let compact = r#"{"id":"7-0","name":"Lima","createdAt":"2025-01-01T00:00:00Z","updatedAt":"2025-01-01T00:00:00Z"}"#;
        std::fs::write(&path, compact).unwrap();

        let out_dir = temp_dir.path().join("exports");
        for command in [
            Command::Show,
            Command::Stats,
            Command::List,
            Command::Share,
            Command::Export {
                out: Some(out_dir.clone()),
            },
        ] {
            exec(&settings, command).unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), compact);
        assert!(out_dir.join("Lima-itinerary.txt").exists());
    }

    #[test]
    fn test_delete_day_declined_without_yes() {
        let (settings, _temp_dir) = settings();
        exec(&settings, Command::New(DetailsArgs::default())).unwrap();
        let output = exec(&settings, Command::DeleteDay { day: 1, yes: false }).unwrap();
        assert_eq!(output, "Cancelled\n");

        let output = exec(&settings, Command::DeleteDay { day: 1, yes: true }).unwrap();
        assert_eq!(output, "Deleted day 1\n");
        assert!(settings.store().current_trip().unwrap().days.is_empty());
    }

    #[test]
    fn test_unknown_day_number_is_reported() {
        let (settings, _temp_dir) = settings();
        exec(&settings, Command::New(DetailsArgs::default())).unwrap();
        let err = exec(&settings, activity(5, "Nowhere")).unwrap_err();
        assert!(matches!(err, CliError::NoSuchDay { number: 5, days: 1 }));
    }

    #[test]
    fn test_delete_activity_by_number() {
        let (settings, _temp_dir) = settings();
        exec(&settings, Command::New(DetailsArgs::default())).unwrap();
        exec(&settings, activity(1, "First")).unwrap();
        exec(&settings, activity(1, "Second")).unwrap();

        exec(
            &settings,
            Command::DeleteActivity {
                day: 1,
                activity: 1,
                yes: true,
            },
        )
        .unwrap();

        let trip = settings.store().current_trip().unwrap();
        assert_eq!(trip.days[0].activities.len(), 1);
        assert_eq!(trip.days[0].activities[0].name, "Second");
        assert!(matches!(
            exec(
                &settings,
                Command::DeleteActivity {
                    day: 1,
                    activity: 0,
                    yes: true
                }
            ),
            Err(CliError::NoSuchActivity { .. })
        ));
    }

    #[test]
    fn test_save_list_and_load() {
        let (settings, _temp_dir) = settings();
        exec(&settings, Command::New(DetailsArgs::default())).unwrap();
        exec(&settings, Command::Save).unwrap();
        exec(&settings, Command::Save).unwrap();
        let saved_id = settings.store().current_trip().unwrap().id;

        let listing = exec(&settings, Command::List).unwrap();
        assert_eq!(listing.lines().count(), 1);
        assert!(listing.starts_with(&saved_id));

        exec(&settings, Command::New(DetailsArgs::default())).unwrap();
        exec(&settings, Command::Load { trip_id: saved_id.clone() }).unwrap();
        assert_eq!(settings.store().current_trip().unwrap().id, saved_id);
    }

    #[test]
    fn test_export_writes_into_out_dir() {
        let (settings, temp_dir) = settings();
        let details = DetailsArgs {
            name: Some("Paris Getaway".to_string()),
            ..DetailsArgs::default()
        };
        exec(&settings, Command::New(details)).unwrap();
        let out_dir = temp_dir.path().join("exports");

        let output = exec(&settings, Command::Export { out: Some(out_dir.clone()) }).unwrap();

        assert!(output.starts_with("Exported to "));
        assert!(out_dir.join("Paris Getaway-itinerary.txt").exists());
    }
}
