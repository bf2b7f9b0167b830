//! Integration tests for the subcommand interface
//!
//! Each test points the binary at its own data directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wanderplan"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("WANDERPLAN_AUTOSAVE_SECS")
        .output()
        .expect("Failed to execute wanderplan")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_flag_exits_successfully() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let help = stdout(&output);
    assert!(help.contains("wanderplan"), "Help should mention wanderplan");
    assert!(help.contains("add-activity"), "Help should list subcommands");
    assert!(help.contains("--data-dir"));
}

#[test]
fn test_show_without_trip_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["show"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no trip is open"), "{}", stderr(&output));
}

#[test]
fn test_plan_a_trip_across_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    let output = run_cli(
        dir,
        &[
            "new",
            "--name",
            "Paris Getaway",
            "--destination",
            "Paris",
            "--start",
            "2025-01-01",
            "--end",
            "2025-01-03",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("Started trip Paris Getaway"));

    assert!(run_cli(dir, &["add-day"]).status.success());
    let output = run_cli(
        dir,
        &[
            "add-activity",
            "2",
            "--name",
            "Louvre",
            "--type",
            "sight",
            "--time",
            "10:00",
            "--location",
            "Rue de Rivoli",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Added \"Louvre\" to day 2\n");

    let show = stdout(&run_cli(dir, &["show"]));
    assert!(show.contains("Destination: Paris"));
    assert!(show.contains("Day 2  2025-01-02"));
    assert!(show.contains("1. 10:00 Louvre [sightseeing]"));

    let stats = stdout(&run_cli(dir, &["stats"]));
    assert!(stats.contains("Duration:     3 days"));
    assert!(stats.contains("Destinations: 1"));
    assert!(stats.contains("Activities:   1"));
}

#[test]
fn test_export_writes_named_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let out_dir = dir.join("exports");

    run_cli(dir, &["new", "--name", "Paris Getaway"]);
    let output = run_cli(dir, &["export", "--out", out_dir.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let path = out_dir.join("Paris Getaway-itinerary.txt");
    let text = std::fs::read_to_string(path).expect("export file should exist");
    assert!(text.starts_with("Paris Getaway"));
    assert!(text.contains("DAY 1"));
}

#[test]
fn test_invalid_activity_type_prints_error_and_exits() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    run_cli(dir, &["new"]);

    let output = run_cli(dir, &["add-activity", "1", "--name", "Spa", "--type", "relaxing"]);
    assert!(!output.status.success(), "Expected invalid type to fail");
    assert!(
        stderr(&output).contains("Invalid activity type"),
        "Should name the bad type: {}",
        stderr(&output)
    );
}

#[test]
fn test_infinite_cost_is_rejected_and_trip_survives() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    run_cli(dir, &["new", "--name", "Oslo"]);

    let output = run_cli(dir, &["add-activity", "1", "--name", "X", "--cost", "inf"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid amount"), "{}", stderr(&output));

    let show = run_cli(dir, &["show"]);
    assert!(show.status.success(), "{}", stderr(&show));
    assert!(stdout(&show).starts_with("Oslo"));
}

#[test]
fn test_add_activity_to_missing_day_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    run_cli(dir, &["new"]);

    let output = run_cli(dir, &["add-activity", "4", "--name", "Dinner"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Day 4 does not exist"));
}

#[test]
fn test_save_list_and_delete_saved() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    run_cli(dir, &["new", "--name", "Kyoto"]);
    assert!(run_cli(dir, &["save"]).status.success());

    let list = stdout(&run_cli(dir, &["list"]));
    assert!(list.contains("Kyoto"));
    let trip_id = list.split_whitespace().next().unwrap().to_string();

    let output = run_cli(dir, &["delete-saved", &trip_id, "--yes"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&run_cli(dir, &["list"])), "No saved trips\n");
}

#[test]
fn test_share_prints_summary() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    run_cli(dir, &["new", "--name", "Lisbon", "--destination", "Portugal"]);

    let output = run_cli(dir, &["share"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Check out my trip \"Lisbon\" to Portugal"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use wanderplan::activities::ActivityType;
    use wanderplan::cli::{Cli, Command};

    #[test]
    fn test_cli_no_args_opens_planner() {
        let cli = Cli::parse_from(["wanderplan"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_add_activity_with_alias() {
        let cli = Cli::parse_from(["wanderplan", "add-activity", "2", "--name", "Tapas", "--type", "eat"]);
        match cli.command {
            Some(Command::AddActivity(args)) => {
                assert_eq!(args.day, 2);
                assert_eq!(args.activity_type, ActivityType::Food);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let result = Cli::try_parse_from(["wanderplan", "new", "--start", "01/02/2025"]);
        assert!(result.is_err());
    }
}
