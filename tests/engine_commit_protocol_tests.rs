use gantt_rs::api::{
    AcceptAll, CommitKind, CommitOutcome, CommitResolution, GanttHandler, GanttKey, Rejection,
    Release, ReparentOutcome,
};
use gantt_rs::core::task_tree::find_task;
use gantt_rs::core::{ReparentRejection, Task, TaskRef, ViewMode, task_list};
use gantt_rs::interaction::BarMoveAction;
use gantt_rs::render::NullRenderer;
use gantt_rs::{GanttEngine, GanttEngineConfig, GanttError};

const DAY: i64 = 86_400_000;
const D0: i64 = 1_704_067_200_000;

fn day(n: i64) -> i64 {
    D0 + n * DAY
}

fn config() -> GanttEngineConfig {
    GanttEngineConfig::new(ViewMode::Day)
        .with_column_width(100.0)
        .with_pre_steps_count(0)
}

fn tasks() -> Vec<TaskRef> {
    task_list(vec![
        Task::task("a", day(0), day(2)).with_progress(10),
        Task::task("b", day(3), day(5)).with_dependencies(["a"]),
    ])
}

fn engine_with(config: GanttEngineConfig) -> GanttEngine<NullRenderer> {
    GanttEngine::with_tasks(NullRenderer::default(), config, tasks()).expect("engine init")
}

fn default_engine() -> GanttEngine<NullRenderer> {
    engine_with(config())
}

fn span(tasks: &[TaskRef], id: &str) -> Option<(i64, i64)> {
    find_task(tasks, id).and_then(|task| task.span())
}

fn progress(tasks: &[TaskRef], id: &str) -> Option<u8> {
    find_task(tasks, id).map(|task| task.progress)
}

struct Refuse;

impl GanttHandler for Refuse {
    fn on_date_change(&mut self, _task: &Task, _tasks: &[TaskRef]) -> CommitOutcome {
        Err(Rejection::Failed("storage offline".to_owned()))
    }

    fn on_delete(&mut self, _task: &Task) -> CommitOutcome {
        Err(Rejection::Declined)
    }
}

#[test]
fn zero_delta_release_commits_nothing() {
    let mut engine = default_engine();
    assert!(engine.begin_gesture("a", BarMoveAction::Move, 50.0).expect("begin"));
    engine.pointer_move(80.0).expect("move");

    assert_eq!(engine.release_gesture().expect("release"), Release::Unchanged);
    assert_eq!(engine.pending_commit_count(), 0);
    assert_eq!(engine.tasks(), engine.committed_tasks());
}

#[test]
fn move_release_is_optimistic_until_accepted() {
    let mut engine = engine_with(config().with_cascade_shift(false));
    engine.begin_gesture("a", BarMoveAction::Move, 50.0).expect("begin");
    engine.pointer_move(200.0).expect("move");

    let release = engine.release_gesture().expect("release");
    let commit = release.pending().cloned().expect("pending commit");
    assert_eq!(commit.kind, CommitKind::DateChange);
    assert_eq!(commit.task.span(), Some((day(2), day(4))));
    assert_eq!(span(&commit.tasks, "a"), Some((day(2), day(4))));

    assert_eq!(span(engine.tasks(), "a"), Some((day(2), day(4))));
    assert_eq!(span(engine.committed_tasks(), "a"), Some((day(0), day(2))));
    assert!(engine.is_task_locked("a"));

    let resolution = engine.settle_commit(commit.id, Ok(())).expect("settle");
    assert_eq!(resolution, CommitResolution::Accepted);
    assert_eq!(span(engine.committed_tasks(), "a"), Some((day(2), day(4))));
    assert_eq!(engine.pending_commit_count(), 0);
    assert!(!engine.is_task_locked("a"));
}

#[test]
fn move_cascades_to_later_siblings() {
    let mut engine = default_engine();
    engine.begin_gesture("a", BarMoveAction::Move, 50.0).expect("begin");
    engine.pointer_move(200.0).expect("move");
    engine.release_gesture().expect("release");

    assert_eq!(span(engine.tasks(), "b"), Some((day(5), day(7))));
}

#[test]
fn rejected_commit_restores_the_snapshot_exactly() {
    let mut engine = default_engine();
    let before = engine.bar("a").cloned().expect("bar a");
    let ticks_before = engine.ticks().to_vec();

    engine.begin_gesture("a", BarMoveAction::End, before.x2).expect("begin");
    engine.pointer_move(before.x2 + 300.0).expect("move");
    let commit = engine
        .release_gesture()
        .expect("release")
        .pending()
        .cloned()
        .expect("pending");
    assert_eq!(engine.commit_snapshot(commit.id), Some(&before));
    assert_ne!(engine.bar("a"), Some(&before));

    let resolution = engine
        .settle_commit(commit.id, Err(Rejection::Declined))
        .expect("settle");
    assert_eq!(resolution, CommitResolution::RolledBack(Rejection::Declined));
    assert_eq!(engine.bar("a"), Some(&before));
    assert_eq!(engine.ticks(), ticks_before.as_slice());
    assert_eq!(engine.tasks(), engine.committed_tasks());
}

#[test]
fn locked_tasks_refuse_new_edits() {
    let mut engine = default_engine();
    engine.begin_gesture("a", BarMoveAction::Progress, 0.0).expect("begin");
    engine.pointer_move(100.0).expect("move");
    engine.release_gesture().expect("release");

    assert_eq!(
        engine.begin_gesture("a", BarMoveAction::Move, 10.0),
        Err(GanttError::TaskLocked("a".to_owned()))
    );
    assert_eq!(
        engine.delete_task("a"),
        Err(GanttError::TaskLocked("a".to_owned()))
    );
    assert_eq!(engine.begin_gesture("b", BarMoveAction::Move, 350.0), Ok(true));
}

#[test]
fn independent_commits_settle_in_any_order() {
    let mut engine = default_engine();
    let a = engine.bar("a").cloned().expect("bar a");
    engine.begin_gesture("a", BarMoveAction::Progress, a.x1).expect("begin a");
    engine.pointer_move(a.x1 + a.width() / 2.0).expect("move a");
    let first = engine.release_gesture().expect("release a").pending().cloned().expect("pending a");

    let b = engine.bar("b").cloned().expect("bar b");
    engine.begin_gesture("b", BarMoveAction::Progress, b.x1).expect("begin b");
    engine.pointer_move(b.x2).expect("move b");
    let second = engine.release_gesture().expect("release b").pending().cloned().expect("pending b");

    assert_eq!(engine.pending_commit_ids(), vec![first.id, second.id]);
    assert_eq!(progress(engine.tasks(), "a"), Some(50));
    assert_eq!(progress(engine.tasks(), "b"), Some(100));

    engine.settle_commit(second.id, Ok(())).expect("accept b");
    assert_eq!(progress(engine.tasks(), "a"), Some(50));

    engine.settle_commit(first.id, Err(Rejection::Declined)).expect("reject a");
    assert_eq!(progress(engine.committed_tasks(), "a"), Some(10));
    assert_eq!(progress(engine.committed_tasks(), "b"), Some(100));
    assert_eq!(engine.tasks(), engine.committed_tasks());
}

#[test]
fn handlers_settle_releases_synchronously() {
    let mut engine = default_engine();
    engine.begin_gesture("b", BarMoveAction::Move, 350.0).expect("begin");
    engine.pointer_move(450.0).expect("move");
    let resolution = engine.release_gesture_with(&mut AcceptAll).expect("release");
    assert_eq!(resolution, Some(CommitResolution::Accepted));
    assert_eq!(span(engine.committed_tasks(), "b"), Some((day(4), day(6))));

    engine.begin_gesture("b", BarMoveAction::Move, 450.0).expect("begin");
    engine.pointer_move(650.0).expect("move");
    let resolution = engine.release_gesture_with(&mut Refuse).expect("release");
    assert_eq!(
        resolution,
        Some(CommitResolution::RolledBack(Rejection::Failed(
            "storage offline".to_owned()
        )))
    );
    assert_eq!(span(engine.tasks(), "b"), Some((day(4), day(6))));
}

#[test]
fn unknown_commit_ids_are_errors() {
    let mut engine = default_engine();
    assert_eq!(
        engine.settle_commit(42, Ok(())),
        Err(GanttError::UnknownCommit(42))
    );
}

#[test]
fn delete_is_optimistic_and_reversible() {
    let mut engine = default_engine();
    let commit = engine.delete_task("b").expect("delete").expect("permitted");
    assert_eq!(commit.kind, CommitKind::Delete);
    assert_eq!(commit.task.id, "b");
    assert!(engine.bar("b").is_none());

    engine.settle_commit(commit.id, Err(Rejection::Declined)).expect("reject");
    assert!(engine.bar("b").is_some());

    assert_eq!(
        engine.delete_task_with("b", &mut Refuse).expect("delete"),
        Some(CommitResolution::RolledBack(Rejection::Declined))
    );
    assert_eq!(
        engine.delete_task_with("b", &mut AcceptAll).expect("delete"),
        Some(CommitResolution::Accepted)
    );
    assert!(find_task(engine.committed_tasks(), "b").is_none());
}

#[test]
fn delete_respects_permissions() {
    let mut engine = engine_with(config().with_deletable(false));
    assert_eq!(engine.delete_task("a"), Ok(None));

    let mut engine = engine_with(config().with_readonly(true));
    assert_eq!(engine.delete_task("a"), Ok(None));

    let mut engine = default_engine();
    assert_eq!(
        engine.delete_task("ghost"),
        Err(GanttError::UnknownTask("ghost".to_owned()))
    );
}

#[test]
fn delete_key_removes_the_selected_task() {
    let mut engine = default_engine();
    assert_eq!(engine.key_down(GanttKey::Delete), Ok(None));

    engine.select(Some("a")).expect("select");
    let commit = engine.key_down(GanttKey::Delete).expect("key").expect("pending");
    assert_eq!(commit.task.id, "a");
    assert_eq!(engine.selected_id(), None);
}

#[test]
fn reparent_requires_hierarchy_drag() {
    let mut engine = default_engine();
    assert_eq!(engine.reparent("a", Some("b")), Ok(ReparentOutcome::Disabled));
}

#[test]
fn reparent_is_a_pending_commit() {
    let mut engine = engine_with(config().with_hierarchy_drag(true).with_show_sub_task(true));
    let commit = match engine.reparent("a", Some("b")).expect("reparent") {
        ReparentOutcome::Pending(commit) => commit,
        other => panic!("expected a pending commit, got {other:?}"),
    };
    assert_eq!(commit.kind, CommitKind::HierarchyChange);
    assert_eq!(commit.new_parent.as_ref().map(|parent| parent.id.as_str()), Some("b"));
    assert_eq!(engine.rows()[1].parent_id.as_deref(), Some("b"));

    engine.settle_commit(commit.id, Err(Rejection::Declined)).expect("reject");
    assert_eq!(engine.tasks(), tasks().as_slice());
}

#[test]
fn reparent_cycles_are_rejected_without_a_commit() {
    let nested = task_list(vec![Task::project("p", day(0), day(4))
        .with_children(vec![Task::task("c", day(0), day(4))])]);
    let mut engine = GanttEngine::with_tasks(
        NullRenderer::default(),
        config().with_hierarchy_drag(true),
        nested.clone(),
    )
    .expect("engine init");

    let outcome = engine.reparent("p", Some("c")).expect("reparent");
    assert!(matches!(
        outcome,
        ReparentOutcome::Rejected(ReparentRejection::DescendantTarget { .. })
    ));
    assert_eq!(engine.pending_commit_count(), 0);
    assert_eq!(engine.tasks(), nested.as_slice());
}

#[test]
fn reloading_tasks_replays_pending_edits() {
    let mut engine = default_engine();
    let a = engine.bar("a").cloned().expect("bar a");
    engine.begin_gesture("a", BarMoveAction::Progress, a.x1).expect("begin");
    engine.pointer_move(a.x2).expect("move");
    let commit = engine.release_gesture().expect("release").pending().cloned().expect("pending");

    let reloaded = task_list(vec![
        Task::task("a", day(0), day(2)).with_name("Renamed").with_progress(10),
        Task::task("b", day(3), day(5)),
    ]);
    engine.set_tasks(reloaded).expect("reload");

    let shown = find_task(engine.tasks(), "a").expect("a");
    assert_eq!(shown.name, "Renamed");
    assert_eq!(shown.progress, 100);

    engine.settle_commit(commit.id, Ok(())).expect("accept");
    assert_eq!(progress(engine.committed_tasks(), "a"), Some(100));
}
