//! Opaque identifiers for trips, days and activities.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns a new id built from the given timestamp.
///
/// The millisecond timestamp is followed by a process-wide sequence number so
/// ids created within the same millisecond stay distinct.
pub fn next_id(now: DateTime<Utc>) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", now.timestamp_millis(), seq)
}
