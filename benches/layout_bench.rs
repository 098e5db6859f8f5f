use criterion::{Criterion, criterion_group, criterion_main};
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::time_axis::seed_ticks;
use gantt_rs::core::{Task, TaskRef, ViewMode, instant_from_x, task_list, x_from_instant};
use gantt_rs::render::NullRenderer;
use std::hint::black_box;

const HOUR: i64 = 3_600_000;
const DAY: i64 = 24 * HOUR;
const D0: i64 = 1_704_067_200_000;

fn generated_tasks(projects: usize, children: usize) -> Vec<TaskRef> {
    task_list(
        (0..projects)
            .map(|p| {
                let base = D0 + (p as i64 % 90) * DAY;
                Task::project(format!("p{p}"), base, base + 10 * DAY).with_children(
                    (0..children)
                        .map(|c| {
                            let start = base + c as i64 * 6 * HOUR;
                            let mut task = Task::task(format!("p{p}-{c}"), start, start + 2 * DAY)
                                .with_progress((c * 17 % 101) as u8);
                            if c > 0 {
                                task = task.with_dependencies([format!("p{p}-{}", c - 1)]);
                            }
                            task
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

fn bench_tick_generation_hour_90d(c: &mut Criterion) {
    c.bench_function("tick_generation_hour_90d", |b| {
        b.iter(|| {
            let _ = seed_ticks(black_box(D0), black_box(D0 + 90 * DAY), ViewMode::Hour)
                .expect("ticks should generate");
        })
    });
}

fn bench_coordinate_round_trip(c: &mut Criterion) {
    let ticks = seed_ticks(D0, D0 + 365 * DAY, ViewMode::Day).expect("ticks should generate");

    c.bench_function("coordinate_round_trip_365d", |b| {
        b.iter(|| {
            let x = x_from_instant(black_box(D0 + 200 * DAY + 5 * HOUR), &ticks, 60.0);
            let _ = instant_from_x(black_box(x), &ticks, 60.0);
        })
    });
}

fn bench_engine_layout_5k_rows(c: &mut Criterion) {
    let config = GanttEngineConfig::new(ViewMode::Day).with_show_sub_task(true);
    let mut engine =
        GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    let tasks = generated_tasks(500, 9);

    c.bench_function("engine_layout_5k_rows", |b| {
        b.iter(|| {
            engine
                .set_tasks(black_box(tasks.clone()))
                .expect("layout should succeed");
        })
    });
}

fn bench_build_frame_5k_rows(c: &mut Criterion) {
    let config = GanttEngineConfig::new(ViewMode::Day).with_show_sub_task(true);
    let mut engine =
        GanttEngine::with_tasks(NullRenderer::default(), config, generated_tasks(500, 9))
            .expect("engine init");

    c.bench_function("build_frame_5k_rows", |b| {
        b.iter(|| {
            let _ = black_box(engine.build_frame());
        })
    });
}

criterion_group!(
    benches,
    bench_tick_generation_hour_90d,
    bench_coordinate_round_trip,
    bench_engine_layout_5k_rows,
    bench_build_frame_5k_rows
);
criterion_main!(benches);
