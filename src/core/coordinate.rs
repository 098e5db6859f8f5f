//! Instant <-> pixel mapping over a tick sequence.
//!
//! Each tick owns one column of `column_width` pixels. Instants between two
//! ticks interpolate linearly inside that column; instants past the last tick
//! extrapolate using the last tick interval. All functions are pure.

use crate::core::types::Timestamp;

const FALLBACK_INTERVAL_MS: f64 = 30.0 * 60.0 * 1000.0;

/// Maps `time` to an x coordinate (left-to-right layout).
#[must_use]
pub fn x_from_instant(time: Timestamp, ticks: &[Timestamp], column_width: f64) -> f64 {
    let Some(&last) = ticks.last() else {
        return 0.0;
    };

    let Some(first_ge) = ticks.iter().position(|&tick| tick >= time) else {
        let last_index = ticks.len() - 1;
        let interval = if last_index > 0 {
            (last - ticks[last_index - 1]) as f64
        } else {
            FALLBACK_INTERVAL_MS
        };
        let fraction = if interval > 0.0 {
            (time - last) as f64 / interval
        } else {
            0.0
        };
        return last_index as f64 * column_width + fraction * column_width;
    };

    if ticks[first_ge] == time {
        return first_ge as f64 * column_width;
    }

    let index = first_ge.saturating_sub(1);
    let Some(&next) = ticks.get(index + 1) else {
        return index as f64 * column_width;
    };
    let interval = (next - ticks[index]) as f64;
    let fraction = if interval > 0.0 {
        (time - ticks[index]) as f64 / interval
    } else {
        0.0
    };
    index as f64 * column_width + fraction * column_width
}

/// Right-to-left mirror of [`x_from_instant`].
///
/// The axis is laid out with time growing leftwards: the tick at index `i`
/// sits on the right edge of mirrored column `n - 1 - i`.
#[must_use]
pub fn x_from_instant_rtl(time: Timestamp, ticks: &[Timestamp], column_width: f64) -> f64 {
    let mirrored_origin = ticks.len().saturating_sub(1) as f64 * column_width;
    mirrored_origin - x_from_instant(time, ticks, column_width) + column_width
}

/// Inverse of [`x_from_instant`]; rounds to the nearest millisecond.
#[must_use]
pub fn instant_from_x(x: f64, ticks: &[Timestamp], column_width: f64) -> Timestamp {
    let (Some(&first), Some(&last)) = (ticks.first(), ticks.last()) else {
        return 0;
    };
    if !x.is_finite() || column_width <= 0.0 {
        return first;
    }

    let position = x / column_width;
    let last_index = ticks.len() - 1;
    if last_index == 0 {
        return first + (position * FALLBACK_INTERVAL_MS).round() as i64;
    }
    if position >= last_index as f64 {
        let interval = (last - ticks[last_index - 1]) as f64;
        return last + ((position - last_index as f64) * interval).round() as i64;
    }

    let index = if position < 0.0 {
        0
    } else {
        position.floor() as usize
    };
    let interval = (ticks[index + 1] - ticks[index]) as f64;
    ticks[index] + ((position - index as f64) * interval).round() as i64
}

/// Inverse of [`x_from_instant_rtl`].
#[must_use]
pub fn instant_from_x_rtl(x: f64, ticks: &[Timestamp], column_width: f64) -> Timestamp {
    let mirrored_origin = ticks.len().saturating_sub(1) as f64 * column_width;
    instant_from_x(mirrored_origin + column_width - x, ticks, column_width)
}
