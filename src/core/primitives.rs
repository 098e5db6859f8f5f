use chrono::{DateTime, Utc};

use crate::core::types::Timestamp;
use crate::error::{GanttError, GanttResult};

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> Timestamp {
    time.timestamp_millis()
}

pub fn millis_to_datetime(millis: Timestamp) -> GanttResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        GanttError::InvalidData(format!("timestamp {millis} is outside the calendar range"))
    })
}

/// Rounds half-way cases towards positive infinity (`-1.5 -> -1`, `1.5 -> 2`).
///
/// Grid snapping must be symmetric in pixel space, so `f64::round`
/// (half away from zero) is not used here.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
