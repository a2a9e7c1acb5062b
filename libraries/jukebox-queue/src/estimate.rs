//! Wait-time estimation
//!
//! Every track is assumed to last the same fixed duration. The head of the
//! pending queue starts now, or one duration from now if something is
//! already playing, and each following entry starts one duration later.

use chrono::{DateTime, Duration, Utc};
use jukebox_core::QueueEntry;

/// Assign `estimated_start_time` to every pending entry, in order
pub fn estimate_start_times(
    pending: &mut [QueueEntry],
    has_current: bool,
    now: DateTime<Utc>,
    per_track: Duration,
) {
    let mut start = if has_current { now + per_track } else { now };

    for entry in pending.iter_mut() {
        entry.estimated_start_time = Some(start);
        start += per_track;
    }
}

/// Human-readable wait until `start`
///
/// - under a minute: `Starting soon`
/// - under an hour: `In 12 min`
/// - otherwise: `In 1h 5m`
pub fn wait_label(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let wait = start - now;

    if wait < Duration::minutes(1) {
        return "Starting soon".to_string();
    }

    let minutes = wait.num_minutes();
    if minutes < 60 {
        format!("In {minutes} min")
    } else {
        format!("In {}h {}m", minutes / 60, minutes % 60)
    }
}
