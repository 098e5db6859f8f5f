//! UTC calendar arithmetic over epoch-millisecond instants.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::primitives::millis_to_datetime;
use crate::core::types::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, Timestamp};
use crate::error::{GanttError, GanttResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

/// Adds `quantity` calendar units to `time`.
///
/// Month and year steps clamp to the last day of the target month.
pub fn add_to_date(time: Timestamp, quantity: i32, unit: DateUnit) -> GanttResult<Timestamp> {
    match unit {
        DateUnit::Year => add_months(time, quantity.saturating_mul(12)),
        DateUnit::Month => add_months(time, quantity),
        DateUnit::Day => checked_offset(time, i64::from(quantity), MILLIS_PER_DAY),
        DateUnit::Hour => checked_offset(time, i64::from(quantity), MILLIS_PER_HOUR),
        DateUnit::Minute => checked_offset(time, i64::from(quantity), MILLIS_PER_MINUTE),
    }
}

/// Snaps `time` down to the start of its enclosing `unit`.
pub fn start_of(time: Timestamp, unit: DateUnit) -> GanttResult<Timestamp> {
    match unit {
        DateUnit::Minute => Ok(time - time.rem_euclid(MILLIS_PER_MINUTE)),
        DateUnit::Hour => Ok(time - time.rem_euclid(MILLIS_PER_HOUR)),
        DateUnit::Day => Ok(time - time.rem_euclid(MILLIS_PER_DAY)),
        DateUnit::Month | DateUnit::Year => {
            let date = millis_to_datetime(time)?.date_naive();
            let month = if unit == DateUnit::Year {
                1
            } else {
                date.month()
            };
            let first = NaiveDate::from_ymd_opt(date.year(), month, 1).ok_or_else(|| {
                GanttError::InvalidData(format!("cannot snap {time} to the start of {unit:?}"))
            })?;
            Ok(naive_to_millis(first.and_time(NaiveTime::MIN)))
        }
    }
}

/// Monday of the ISO week containing `time`, keeping the time of day.
pub fn monday_of(time: Timestamp) -> GanttResult<Timestamp> {
    let weekday = millis_to_datetime(time)?.weekday();
    checked_offset(
        time,
        -i64::from(weekday.num_days_from_monday()),
        MILLIS_PER_DAY,
    )
}

fn add_months(time: Timestamp, months: i32) -> GanttResult<Timestamp> {
    let date_time = millis_to_datetime(time)?.naive_utc();
    let shifted = if months >= 0 {
        date_time.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date_time.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted
        .map(naive_to_millis)
        .ok_or_else(|| GanttError::InvalidData(format!("adding {months} months to {time} overflows")))
}

fn checked_offset(time: Timestamp, quantity: i64, unit_ms: i64) -> GanttResult<Timestamp> {
    quantity
        .checked_mul(unit_ms)
        .and_then(|delta| time.checked_add(delta))
        .ok_or_else(|| GanttError::InvalidData(format!("offsetting {time} overflows")))
}

fn naive_to_millis(value: NaiveDateTime) -> Timestamp {
    value.and_utc().timestamp_millis()
}
