//! Runtime settings resolved from the command line and environment
//!
//! Flags win over environment variables (handled by clap), which win over
//! the per-user data directory.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Cli, CliError};
use crate::storage::{self, TripStore};

/// File name of the log written into the data directory
pub const LOG_FILE_NAME: &str = "wanderplan.log";

/// Settings shared by the planner screen and the subcommands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where trips and the log file live
    pub data_dir: PathBuf,
    /// How often the planner screen writes the autosave slot
    pub autosave_interval: Duration,
}

impl Settings {
    /// Resolves settings from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Err(CliError::NoDataDir)` if no `--data-dir` was given and no home
    ///   directory can be found
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => storage::default_data_dir().ok_or(CliError::NoDataDir)?,
        };
        Ok(Self {
            data_dir,
            autosave_interval: Duration::from_secs(cli.autosave_secs.max(1)),
        })
    }

    /// A trip store rooted at the data directory
    pub fn store(&self) -> TripStore {
        TripStore::with_dir(self.data_dir.clone())
    }

    /// Path of the log file
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_explicit_data_dir_is_used() {
        let cli = Cli::parse_from(["wanderplan", "--data-dir", "/tmp/wp"]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/wp"));
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/wp/wanderplan.log"));
        assert_eq!(settings.store().data_dir(), PathBuf::from("/tmp/wp").as_path());
    }

    #[test]
    fn test_autosave_interval_from_flag() {
        let cli = Cli::parse_from(["wanderplan", "--data-dir", "/tmp/wp", "--autosave-secs", "5"]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.autosave_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_autosave_interval_is_raised_to_one_second() {
        let cli = Cli::parse_from(["wanderplan", "--data-dir", "/tmp/wp", "--autosave-secs", "0"]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.autosave_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_default_data_dir_mentions_project() {
        let cli = Cli::parse_from(["wanderplan"]);
        // Passes when no home directory exists (e.g., sandboxed CI)
        if let Ok(settings) = Settings::from_cli(&cli) {
            if std::env::var_os("WANDERPLAN_DATA_DIR").is_none() {
                assert!(settings.data_dir.to_string_lossy().contains("wanderplan"));
            }
        }
    }
}
