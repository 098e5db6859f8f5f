use approx::assert_relative_eq;
use gantt_rs::core::{Task, TaskRef, ViewMode, task_list};
use gantt_rs::interaction::BarMoveAction;
use gantt_rs::render::{NullRenderer, Point};
use gantt_rs::{GanttEngine, GanttEngineConfig};

const DAY: i64 = 86_400_000;
const D0: i64 = 1_704_067_200_000;

fn config() -> GanttEngineConfig {
    GanttEngineConfig::new(ViewMode::Day)
        .with_column_width(100.0)
        .with_row_height(50.0)
        .with_bar_fill(60.0)
        .with_arrow_indent(20.0)
        .with_pre_steps_count(0)
}

fn tasks() -> Vec<TaskRef> {
    task_list(vec![
        Task::task("a", D0, D0 + 2 * DAY).with_progress(50),
        Task::task("b", D0 + 3 * DAY, D0 + 5 * DAY).with_dependencies(["a"]),
    ])
}

fn engine_with(config: GanttEngineConfig) -> GanttEngine<NullRenderer> {
    GanttEngine::with_tasks(NullRenderer::default(), config, tasks()).expect("engine init")
}

#[test]
fn render_hands_a_valid_frame_to_the_backend() {
    let mut engine = engine_with(config());
    engine.render().expect("render");

    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_bar_count, 2);
    assert_eq!(renderer.last_arrow_count, 1);
}

#[test]
fn frame_covers_columns_rows_and_bars() {
    let mut engine = engine_with(config());
    let frame = engine.build_frame();

    assert_eq!(frame.columns.len(), engine.ticks().len());
    assert_relative_eq!(frame.width, engine.ticks().len() as f64 * 100.0);
    assert_relative_eq!(frame.height, 100.0);
    assert_eq!(frame.rows[1].task_id, "b");
    assert_relative_eq!(frame.rows[1].y, 50.0);

    let a = &frame.bars[0];
    assert_relative_eq!(a.x1, 0.0);
    assert_relative_eq!(a.x2, 200.0);
    assert_relative_eq!(a.y, 10.0);
    assert_relative_eq!(a.height, 30.0);
    assert_relative_eq!(a.progress_width, 100.0);
    assert!(a.show_handles);
    assert!(!a.selected);
    assert_eq!(a.background_color, "#b8c2cc");
}

#[test]
fn dependency_arrow_routes_between_bar_edges() {
    let mut engine = engine_with(config());
    let frame = engine.build_frame();
    let arrow = &frame.arrows[0];

    assert_eq!((arrow.from_id.as_str(), arrow.to_id.as_str()), ("a", "b"));
    assert_eq!(
        arrow.points,
        vec![
            Point::new(200.0, 25.0),
            Point::new(220.0, 25.0),
            Point::new(220.0, 50.0),
            Point::new(220.0, 75.0),
            Point::new(300.0, 75.0),
        ]
    );
    assert_eq!(
        arrow.head,
        [
            Point::new(300.0, 75.0),
            Point::new(295.0, 70.0),
            Point::new(295.0, 80.0),
        ]
    );
}

#[test]
fn close_bars_double_back_before_the_target() {
    let tasks = task_list(vec![
        Task::task("a", D0, D0 + 2 * DAY),
        Task::task("b", D0 + 2 * DAY, D0 + 4 * DAY).with_dependencies(["a"]),
    ]);
    let mut engine =
        GanttEngine::with_tasks(NullRenderer::default(), config(), tasks).expect("engine init");
    let frame = engine.build_frame();
    let points = &frame.arrows[0].points;

    // 200 + 2 * 20 is not left of 200, so the path bends at 200 - 20.
    assert_eq!(points[1], Point::new(220.0, 25.0));
    assert_eq!(points[3], Point::new(180.0, 50.0));
    assert_eq!(points.last(), Some(&Point::new(200.0, 75.0)));
}

#[test]
fn selection_switches_to_selected_colours() {
    let mut engine = engine_with(config());
    engine.select(Some("a")).expect("select");
    let frame = engine.build_frame();

    assert!(frame.bars[0].selected);
    assert_eq!(frame.bars[0].background_color, "#aeb8c2");
    assert_eq!(frame.bars[0].progress_color, "#8282f5");
    assert_eq!(frame.bars[1].background_color, "#b8c2cc");
}

#[test]
fn readonly_bars_hide_their_handles() {
    let mut engine = engine_with(config().with_readonly(true));
    let frame = engine.build_frame();
    assert!(frame.bars.iter().all(|bar| !bar.show_handles));
}

#[test]
fn active_gesture_draws_candidate_geometry() {
    let mut engine = engine_with(config());
    engine.begin_gesture("a", BarMoveAction::Move, 50.0).expect("begin");
    engine.pointer_move(150.0).expect("move");

    let frame = engine.build_frame();
    assert_relative_eq!(frame.bars[0].x1, 100.0);
    assert_relative_eq!(frame.bars[0].x2, 300.0);
    // The committed layout is untouched until release.
    assert_relative_eq!(engine.bar("a").map_or(-1.0, |bar| bar.x1), 0.0);
    assert_eq!(frame.arrows.len(), 1);
}

#[test]
fn arrows_leave_milestones_at_the_diamond_centre() {
    let tasks = task_list(vec![
        Task::milestone("m", D0 + DAY),
        Task::task("b", D0 + 3 * DAY, D0 + 5 * DAY).with_dependencies(["m"]),
    ]);
    let mut engine =
        GanttEngine::with_tasks(NullRenderer::default(), config(), tasks).expect("engine init");
    let frame = engine.build_frame();
    let milestone = &frame.bars[0];
    let arrow = &frame.arrows[0];

    assert_relative_eq!(arrow.points[0].y, milestone.y + milestone.height / 2.0);
    assert_relative_eq!(arrow.points[0].y, 10.0 + 30.0 / std::f64::consts::SQRT_2 / 2.0);
    assert_relative_eq!(arrow.head[0].y, 75.0);
}

#[test]
fn rtl_mirrors_columns_and_arrows() {
    let mut engine = engine_with(config().with_rtl(true));
    let frame = engine.build_frame();
    let width = frame.width;

    assert_relative_eq!(frame.columns[0].x, width - 100.0);
    assert_relative_eq!(frame.bars[0].x2, width);
    assert_relative_eq!(frame.bars[0].x1, width - 200.0);

    let arrow = &frame.arrows[0];
    assert_eq!(arrow.points[0], Point::new(width - 200.0, 25.0));
    assert_eq!(arrow.head[0], Point::new(width - 300.0, 75.0));
    assert_eq!(arrow.head[1], Point::new(width - 295.0, 70.0));
}

#[test]
fn empty_engine_renders_an_empty_frame() {
    let mut engine =
        GanttEngine::new(NullRenderer::default(), config()).expect("engine init");
    let frame = engine.build_frame();
    assert!(frame.is_empty());
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_bar_count, 0);
}
