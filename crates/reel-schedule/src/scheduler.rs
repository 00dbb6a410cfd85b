//! Publish-time computation.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::warn;

/// Default daily publish slots, local time.
pub fn default_publish_slots() -> Vec<NaiveTime> {
    [(6, 0), (13, 0), (18, 0), (21, 0)]
        .iter()
        .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .collect()
}

/// Default local-time offset from UTC (+5h30m).
pub fn default_utc_offset() -> Duration {
    Duration::minutes(330)
}

/// Compute the next `count` publish instants.
///
/// The anchor day is the local calendar day after `last_upload` when a
/// checkpoint exists, otherwise today's local date. Each day's slots are
/// visited in order, converted to absolute time by subtracting the
/// offset, and kept only when strictly after `now`; days advance until
/// `count` instants are collected.
///
/// The result is strictly increasing and entirely in the future. A zero
/// count, or an empty slot list, yields an empty vector.
pub fn next_publish_times(
    now: DateTime<Utc>,
    count: usize,
    last_upload: Option<DateTime<Utc>>,
    slots: &[NaiveTime],
    utc_offset: Duration,
) -> Vec<DateTime<Utc>> {
    if count == 0 {
        return Vec::new();
    }
    if slots.is_empty() {
        // The day loop below would never terminate without slots
        warn!("No publish slots configured, nothing to schedule");
        return Vec::new();
    }

    let mut day = match last_upload {
        Some(last) => (last + utc_offset).date_naive() + Duration::days(1),
        None => (now + utc_offset).date_naive(),
    };

    let mut schedule = Vec::with_capacity(count);
    while schedule.len() < count {
        for slot in slots {
            let local = day.and_time(*slot);
            let instant = DateTime::<Utc>::from_naive_utc_and_offset(local - utc_offset, Utc);
            if instant > now {
                schedule.push(instant);
                if schedule.len() >= count {
                    break;
                }
            }
        }
        day += Duration::days(1);
    }

    schedule
}
