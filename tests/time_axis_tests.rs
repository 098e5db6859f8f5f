use chrono::{TimeZone, Utc};
use gantt_rs::core::time_axis::{compute_range, seed_ticks};
use gantt_rs::core::{Task, TimeAxis, Timestamp, ViewMode, task_list};

const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

#[test]
fn day_mode_pads_one_step_before_and_nineteen_days_after() {
    let tasks = task_list(vec![Task::task("a", at(2024, 1, 10, 9, 0), at(2024, 1, 12, 17, 0))]);
    let axis = TimeAxis::from_tasks(&tasks, ViewMode::Day, 1, None).expect("axis");

    assert_eq!(axis.date_range(), (at(2024, 1, 9, 0, 0), at(2024, 1, 31, 0, 0)));
    assert_eq!(axis.ticks().first().copied(), Some(at(2024, 1, 9, 0, 0)));
    assert_eq!(axis.ticks().last().copied(), Some(at(2024, 1, 31, 0, 0)));
    assert_eq!(axis.column_count(), 23);
    assert!(axis.ticks().windows(2).all(|pair| pair[1] - pair[0] == DAY));
    assert_eq!(axis.width(60.0), 23.0 * 60.0);
}

#[test]
fn week_mode_starts_on_a_monday() {
    // 2024-01-10 is a Wednesday; its Monday is 2024-01-08.
    let tasks = task_list(vec![Task::task("a", at(2024, 1, 10, 0, 0), at(2024, 1, 20, 0, 0))]);
    let axis = TimeAxis::from_tasks(&tasks, ViewMode::Week, 1, None).expect("axis");

    assert_eq!(axis.ticks()[0], at(2024, 1, 1, 0, 0));
    assert_eq!(axis.ticks()[1], at(2024, 1, 8, 0, 0));
    assert!(axis.ticks().last().copied().unwrap_or_default() >= at(2024, 2, 20, 0, 0));
}

#[test]
fn month_mode_snaps_to_month_starts_and_runs_into_next_year() {
    let tasks = task_list(vec![Task::task("a", at(2024, 3, 15, 0, 0), at(2024, 3, 20, 0, 0))]);
    let axis = TimeAxis::from_tasks(&tasks, ViewMode::Month, 1, None).expect("axis");

    assert_eq!(axis.ticks()[0], at(2024, 2, 1, 0, 0));
    assert_eq!(axis.ticks()[1], at(2024, 3, 1, 0, 0));
    assert_eq!(axis.ticks().last().copied(), Some(at(2025, 1, 1, 0, 0)));
    assert_eq!(axis.column_count(), 12);
}

#[test]
fn year_and_quarter_modes_pad_whole_units() {
    let tasks = task_list(vec![Task::task("a", at(2024, 5, 1, 0, 0), at(2024, 6, 1, 0, 0))]);

    let years = TimeAxis::from_tasks(&tasks, ViewMode::Year, 1, None).expect("year axis");
    assert_eq!(
        years.ticks(),
        &[at(2023, 1, 1, 0, 0), at(2024, 1, 1, 0, 0), at(2025, 1, 1, 0, 0)]
    );

    let quarters = TimeAxis::from_tasks(&tasks, ViewMode::QuarterYear, 1, None).expect("quarter axis");
    assert_eq!(quarters.ticks()[0], at(2024, 2, 1, 0, 0));
    assert_eq!(quarters.ticks()[1], at(2024, 5, 1, 0, 0));
    assert!(quarters.ticks().last().copied().unwrap_or_default() >= at(2027, 1, 1, 0, 0));
}

#[test]
fn hour_modes_run_to_the_next_midnight() {
    let tasks = task_list(vec![Task::task("a", at(2024, 1, 10, 10, 30), at(2024, 1, 10, 12, 0))]);

    let hours = TimeAxis::from_tasks(&tasks, ViewMode::Hour, 1, None).expect("hour axis");
    assert_eq!(hours.ticks()[0], at(2024, 1, 10, 9, 0));
    assert_eq!(hours.ticks().last().copied(), Some(at(2024, 1, 11, 0, 0)));
    assert_eq!(hours.column_count(), 16);

    let half_hours = TimeAxis::from_tasks(&tasks, ViewMode::HalfHour, 1, None).expect("half-hour axis");
    assert_eq!(half_hours.ticks()[1] - half_hours.ticks()[0], HOUR / 2);
    assert_eq!(half_hours.column_count(), 31);
}

#[test]
fn explicit_range_replaces_task_extent() {
    let tasks = task_list(vec![Task::task("a", at(2024, 1, 10, 0, 0), at(2024, 1, 12, 0, 0))]);
    let explicit = (at(2024, 3, 1, 0, 0), at(2024, 3, 2, 0, 0));
    let range = compute_range(&tasks, ViewMode::Day, 0, Some(explicit)).expect("range");

    assert_eq!(range, (at(2024, 3, 1, 0, 0), at(2024, 3, 21, 0, 0)));
}

#[test]
fn range_covers_nested_children() {
    let tasks = task_list(vec![
        Task::project("p", at(2024, 1, 10, 0, 0), at(2024, 1, 11, 0, 0))
            .with_children(vec![Task::task("c", at(2024, 1, 5, 0, 0), at(2024, 2, 1, 0, 0))]),
    ]);
    let range = compute_range(&tasks, ViewMode::Day, 0, None).expect("range");

    assert_eq!(range.0, at(2024, 1, 5, 0, 0));
    assert_eq!(range.1, at(2024, 2, 20, 0, 0));
}

#[test]
fn range_without_scheduled_tasks_is_an_error() {
    let tasks = task_list(vec![Task::unscheduled("u", Default::default())]);
    assert!(compute_range(&tasks, ViewMode::Day, 1, None).is_err());
}

#[test]
fn collapsed_range_still_yields_two_ticks() {
    let t = at(2024, 1, 1, 0, 0);
    let ticks = seed_ticks(t, t, ViewMode::Day).expect("ticks");
    assert_eq!(ticks, vec![t, t + DAY]);
}
