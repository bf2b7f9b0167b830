//! Log setup
//!
//! The planner screen owns the terminal, so logs go to a file in the data
//! directory. `RUST_LOG` overrides the default `wanderplan=info` filter.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;

const DEFAULT_FILTER: &str = "wanderplan=info";

/// Installs the global subscriber writing to the settings' log file.
///
/// Calling this more than once keeps the first subscriber.
pub fn init(settings: &Settings) -> io::Result<()> {
    fs::create_dir_all(&settings.data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(settings.log_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
