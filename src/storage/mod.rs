//! Trip storage on disk
//!
//! Stands in for browser local storage: each key is a pretty-printed JSON
//! document in the user's data directory. The `currentTrip` key holds the
//! autosave slot and `savedTrips` holds the list of explicitly saved trips.
//! Writers overwrite whole documents, so the last write wins.

mod store;

pub use store::{default_data_dir, StorageError, TripStore, CURRENT_TRIP_KEY, SAVED_TRIPS_KEY};
