use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::calendar_math::{DateUnit, add_to_date, monday_of, start_of};
use crate::core::task_tree::walk_tasks;
use crate::core::types::{TaskRef, Timestamp, ViewMode};
use crate::error::{GanttError, GanttResult};

/// Generated time axis: the padded date range and its tick sequence.
///
/// Ticks are strictly increasing, the first tick is the padded start and the
/// last tick is the first step at or past the padded end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    view_mode: ViewMode,
    range: (Timestamp, Timestamp),
    ticks: Vec<Timestamp>,
}

impl TimeAxis {
    /// Builds the axis for a task tree (every node, collapsed or not).
    pub fn from_tasks(
        tasks: &[TaskRef],
        view_mode: ViewMode,
        pre_steps_count: u32,
        explicit_range: Option<(Timestamp, Timestamp)>,
    ) -> GanttResult<Self> {
        let range = compute_range(tasks, view_mode, pre_steps_count, explicit_range)?;
        Self::from_range(range.0, range.1, view_mode)
    }

    /// Builds the axis from an already padded range.
    pub fn from_range(start: Timestamp, end: Timestamp, view_mode: ViewMode) -> GanttResult<Self> {
        let ticks = seed_ticks(start, end, view_mode)?;
        Ok(Self {
            view_mode,
            range: (start, end),
            ticks,
        })
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn date_range(&self) -> (Timestamp, Timestamp) {
        self.range
    }

    #[must_use]
    pub fn ticks(&self) -> &[Timestamp] {
        &self.ticks
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.ticks.len()
    }

    /// Total chart width: one column per tick.
    #[must_use]
    pub fn width(&self, column_width: f64) -> f64 {
        self.ticks.len() as f64 * column_width
    }
}

/// Computes the padded `[start, end]` range the ticks are seeded from.
///
/// The seed is `explicit_range` when given, otherwise the min start / max end
/// over every scheduled node of the tree. Each view mode then applies its own
/// lead/trail padding and snapping.
pub fn compute_range(
    tasks: &[TaskRef],
    view_mode: ViewMode,
    pre_steps_count: u32,
    explicit_range: Option<(Timestamp, Timestamp)>,
) -> GanttResult<(Timestamp, Timestamp)> {
    let (start, end) = match explicit_range {
        Some(range) => range,
        None => task_extent(tasks).ok_or_else(|| {
            GanttError::InvalidData("cannot derive a date range without scheduled tasks".to_owned())
        })?,
    };
    let pre = i32::try_from(pre_steps_count).unwrap_or(i32::MAX);

    let padded = match view_mode {
        ViewMode::Year => (
            start_of(add_to_date(start, -1, DateUnit::Year)?, DateUnit::Year)?,
            start_of(add_to_date(end, 1, DateUnit::Year)?, DateUnit::Year)?,
        ),
        ViewMode::QuarterYear => (
            start_of(add_to_date(start, -3, DateUnit::Month)?, DateUnit::Month)?,
            start_of(add_to_date(end, 3, DateUnit::Year)?, DateUnit::Year)?,
        ),
        ViewMode::Month => (
            start_of(add_to_date(start, -pre, DateUnit::Month)?, DateUnit::Month)?,
            start_of(add_to_date(end, 1, DateUnit::Year)?, DateUnit::Year)?,
        ),
        ViewMode::Week => {
            let monday = monday_of(start_of(start, DateUnit::Day)?)?;
            (
                add_to_date(monday, pre.saturating_mul(-7), DateUnit::Day)?,
                add_to_date(start_of(end, DateUnit::Day)?, 1, DateUnit::Month)?,
            )
        }
        ViewMode::Day => (
            add_to_date(start_of(start, DateUnit::Day)?, -pre, DateUnit::Day)?,
            add_to_date(start_of(end, DateUnit::Day)?, 19, DateUnit::Day)?,
        ),
        ViewMode::QuarterDay => (
            add_to_date(start_of(start, DateUnit::Day)?, -pre, DateUnit::Day)?,
            add_to_date(start_of(end, DateUnit::Day)?, 66, DateUnit::Hour)?,
        ),
        ViewMode::HalfDay => (
            add_to_date(start_of(start, DateUnit::Day)?, -pre, DateUnit::Day)?,
            add_to_date(start_of(end, DateUnit::Day)?, 108, DateUnit::Hour)?,
        ),
        ViewMode::Hour | ViewMode::HalfHour => (
            add_to_date(start_of(start, DateUnit::Hour)?, -pre, DateUnit::Hour)?,
            add_to_date(start_of(end, DateUnit::Day)?, 1, DateUnit::Day)?,
        ),
    };

    trace!(
        ?view_mode,
        seed_start = start,
        seed_end = end,
        padded_start = padded.0,
        padded_end = padded.1,
        "computed date range"
    );
    Ok(padded)
}

/// Generates ticks from `start`, one granularity unit apart, until the last
/// tick reaches or passes `end`. At least two ticks are always emitted so
/// every instant has an interpolation interval.
pub fn seed_ticks(
    start: Timestamp,
    end: Timestamp,
    view_mode: ViewMode,
) -> GanttResult<Vec<Timestamp>> {
    let mut current = start;
    let mut ticks = vec![current];
    while current < end || ticks.len() < 2 {
        current = next_tick(current, view_mode)?;
        ticks.push(current);
    }
    Ok(ticks)
}

/// Advances one granularity unit.
pub fn next_tick(time: Timestamp, view_mode: ViewMode) -> GanttResult<Timestamp> {
    match view_mode {
        ViewMode::Year => add_to_date(time, 1, DateUnit::Year),
        ViewMode::QuarterYear => add_to_date(time, 3, DateUnit::Month),
        ViewMode::Month => add_to_date(time, 1, DateUnit::Month),
        ViewMode::Week => add_to_date(time, 7, DateUnit::Day),
        ViewMode::Day => add_to_date(time, 1, DateUnit::Day),
        ViewMode::HalfDay => add_to_date(time, 12, DateUnit::Hour),
        ViewMode::QuarterDay => add_to_date(time, 6, DateUnit::Hour),
        ViewMode::HalfHour => add_to_date(time, 30, DateUnit::Minute),
        ViewMode::Hour => add_to_date(time, 1, DateUnit::Hour),
    }
}

/// Min start and max end over every scheduled node; inverted spans are skipped.
#[must_use]
pub fn task_extent(tasks: &[TaskRef]) -> Option<(Timestamp, Timestamp)> {
    let mut extent: Option<(Timestamp, Timestamp)> = None;
    walk_tasks(tasks, &mut |task, _depth| {
        if let Some((start, end)) = task.span().filter(|&(start, end)| end >= start) {
            extent = Some(match extent {
                Some((min, max)) => (min.min(start), max.max(end)),
                None => (start, end),
            });
        }
    });
    extent
}
