use gantt_rs::core::{
    BarGeometryParams, BarPalette, Task, TaskRef, TaskType, TimeAxis, ViewMode, build_bar_tasks,
    flatten_tasks, task_list, x_from_instant,
};
use gantt_rs::interaction::{BarMoveAction, GestureInput, translate_gesture};
use proptest::prelude::*;

const HOUR: i64 = 3_600_000;
// 2001-01-01 .. 2037-01-01
const EPOCH_MIN: i64 = 978_307_200_000;
const EPOCH_MAX: i64 = 2_114_380_800_000;

fn view_mode() -> impl Strategy<Value = ViewMode> {
    prop::sample::select(ViewMode::ALL.to_vec())
}

/// `(start, duration)` pairs inside a two-month window, so hour modes stay
/// at a few thousand ticks.
fn spans(max: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    (EPOCH_MIN..EPOCH_MAX).prop_flat_map(move |origin| {
        prop::collection::vec(
            (origin..origin + 30 * 24 * HOUR, 60_000_i64..(30 * 24 * HOUR)),
            1..max,
        )
    })
}

fn tasks_from(spans: &[(i64, i64)]) -> Vec<TaskRef> {
    task_list(
        spans
            .iter()
            .enumerate()
            .map(|(index, &(start, duration))| {
                Task::task(format!("t{index}"), start, start + duration)
            })
            .collect(),
    )
}

fn params(column_width: f64, handle_width: f64, rtl: bool) -> BarGeometryParams {
    BarGeometryParams {
        column_width,
        row_height: 50.0,
        task_height: 30.0,
        bar_corner_radius: 3.0,
        handle_width,
        rtl,
    }
}

proptest! {
    #[test]
    fn move_gestures_preserve_duration(
        span in (EPOCH_MIN..EPOCH_MAX, HOUR..(60 * 24 * HOUR)),
        mode in view_mode(),
        delta_px in -2_000.0_f64..2_000.0,
        column_width in 20.0_f64..200.0,
        rtl in any::<bool>(),
    ) {
        let tasks = tasks_from(&[span]);
        let axis = TimeAxis::from_tasks(&tasks, mode, 1, None).expect("axis");
        let rows = flatten_tasks(&tasks, false, None);
        let bars = build_bar_tasks(
            &rows,
            axis.ticks(),
            params(column_width, 8.0, rtl),
            &BarPalette::default(),
        );
        let snapshot = &bars[0];

        let input = GestureInput {
            pointer_x: snapshot.x1 + delta_px,
            x_step: column_width,
            time_step_ms: mode.nominal_step_ms(),
            init_x1_delta: 0.0,
            rtl,
        };
        let result = translate_gesture(BarMoveAction::Move, snapshot, input);

        prop_assert_eq!(
            result.changed.end - result.changed.start,
            snapshot.end - snapshot.start
        );
        prop_assert!(
            ((result.changed.x2 - result.changed.x1) - (snapshot.x2 - snapshot.x1)).abs() < 1e-6
        );
    }

    #[test]
    fn task_bars_are_never_narrower_than_both_handles(
        spans in spans(12),
        mode in view_mode(),
        column_width in 10.0_f64..200.0,
        handle_width in 1.0_f64..20.0,
        rtl in any::<bool>(),
    ) {
        let tasks = tasks_from(&spans);
        let axis = TimeAxis::from_tasks(&tasks, mode, 1, None).expect("axis");
        let rows = flatten_tasks(&tasks, false, None);
        let bars = build_bar_tasks(
            &rows,
            axis.ticks(),
            params(column_width, handle_width, rtl),
            &BarPalette::default(),
        );

        prop_assert_eq!(bars.len(), spans.len());
        for bar in bars.iter().filter(|bar| bar.kind() == TaskType::Task) {
            prop_assert!(bar.x2 - bar.x1 >= 2.0 * handle_width - 1e-6);
        }
    }

    #[test]
    fn ticks_cover_every_task(
        spans in spans(12),
        mode in view_mode(),
        pre_steps in 0_u32..4,
    ) {
        let tasks = tasks_from(&spans);
        let axis = TimeAxis::from_tasks(&tasks, mode, pre_steps, None).expect("axis");
        let ticks = axis.ticks();

        let min_start = spans.iter().map(|&(start, _)| start).min().unwrap_or_default();
        let max_end = spans
            .iter()
            .map(|&(start, duration)| start + duration)
            .max()
            .unwrap_or_default();

        prop_assert!(ticks.len() >= 2);
        prop_assert!(ticks[0] <= min_start);
        prop_assert!(ticks[ticks.len() - 1] >= max_end);
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ticks_map_to_exact_column_edges(
        span in (EPOCH_MIN..EPOCH_MAX, HOUR..(20 * 24 * HOUR)),
        mode in view_mode(),
        column_width in 1.0_f64..500.0,
    ) {
        let tasks = tasks_from(&[span]);
        let axis = TimeAxis::from_tasks(&tasks, mode, 1, None).expect("axis");

        for (index, &tick) in axis.ticks().iter().enumerate() {
            prop_assert_eq!(
                x_from_instant(tick, axis.ticks(), column_width),
                index as f64 * column_width
            );
        }
    }
}
