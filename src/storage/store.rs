//! JSON-file trip store
//!
//! Provides a `TripStore` that keeps the autosave slot and the saved-trips
//! list as JSON files, one file per storage key.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::Trip;

/// Storage key of the autosave slot
pub const CURRENT_TRIP_KEY: &str = "currentTrip";
/// Storage key of the saved-trips list
pub const SAVED_TRIPS_KEY: &str = "savedTrips";

/// Errors raised while writing or reading trip documents
#[derive(Debug, Error)]
pub enum StorageError {
    /// Directory creation or file access failed
    #[error("trip storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// A document could not be encoded or decoded
    #[error("trip storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The trip holds an infinite or NaN amount, which JSON would turn into null
    #[error("trip {0} has an amount that is not a finite number")]
    NonFiniteAmount(String),
}

fn ensure_storable(trip: &Trip) -> Result<(), StorageError> {
    if trip.has_finite_amounts() {
        Ok(())
    } else {
        Err(StorageError::NonFiniteAmount(trip.id.clone()))
    }
}

/// Reads and writes trip documents in a data directory
///
/// The default directory is XDG-compliant (`~/.local/share/wanderplan/` on
/// Linux). Missing or unparsable documents read as absent, so a corrupt file
/// never blocks the planner from starting.
#[derive(Debug, Clone)]
pub struct TripStore {
    /// Directory where trip documents are stored
    data_dir: PathBuf,
}

/// The XDG-compliant data directory for wanderplan
///
/// Returns `None` if the directory cannot be determined (e.g., no home directory).
pub fn default_data_dir() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "wanderplan")?;
    Some(project_dirs.data_dir().to_path_buf())
}

impl TripStore {
    /// Creates a TripStore rooted at a custom directory
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory this store writes into
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the document for the given key
    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.key_path(key), json)?;
        debug!(key, "wrote trip document");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(key, %err, "ignoring unreadable trip document");
                None
            }
        }
    }

    /// Reads the autosave slot
    pub fn current_trip(&self) -> Option<Trip> {
        self.read(CURRENT_TRIP_KEY)
    }

    /// Overwrites the autosave slot with the given trip
    pub fn write_current_trip(&self, trip: &Trip) -> Result<(), StorageError> {
        ensure_storable(trip)?;
        self.write(CURRENT_TRIP_KEY, trip)
    }

    /// Removes the autosave slot, if present
    pub fn clear_current_trip(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(CURRENT_TRIP_KEY)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Reads the saved-trips list for display; absent or unreadable lists are empty
    pub fn saved_trips(&self) -> Vec<Trip> {
        self.read(SAVED_TRIPS_KEY).unwrap_or_default()
    }

    /// Reads the saved-trips list before rewriting it
    ///
    /// Only a missing file reads as empty. Any other failure is returned so
    /// the caller never overwrites a list it could not read.
    pub fn read_saved_trips(&self) -> Result<Vec<Trip>, StorageError> {
        let content = match fs::read_to_string(self.key_path(SAVED_TRIPS_KEY)) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Looks up a saved trip by id
    pub fn find_saved_trip(&self, trip_id: &str) -> Option<Trip> {
        self.saved_trips().into_iter().find(|t| t.id == trip_id)
    }

    /// Inserts or replaces a trip in the saved-trips list, matched by id
    ///
    /// A replaced entry keeps its position; a new entry is appended.
    pub fn upsert_saved_trip(&self, trip: &Trip) -> Result<(), StorageError> {
        ensure_storable(trip)?;
        let mut trips = self.read_saved_trips()?;
        match trips.iter_mut().find(|t| t.id == trip.id) {
            Some(existing) => *existing = trip.clone(),
            None => trips.push(trip.clone()),
        }
        self.write(SAVED_TRIPS_KEY, &trips)
    }

    /// Removes a saved trip by id
    ///
    /// Returns `Ok(false)` when no trip with that id was saved; the list is not rewritten.
    pub fn delete_saved_trip(&self, trip_id: &str) -> Result<bool, StorageError> {
        let mut trips = self.read_saved_trips()?;
        let before = trips.len();
        trips.retain(|t| t.id != trip_id);
        if trips.len() == before {
            return Ok(false);
        }
        self.write(SAVED_TRIPS_KEY, &trips)?;
        Ok(true)
    }
}
