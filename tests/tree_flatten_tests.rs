use gantt_rs::core::{Task, TaskType, flatten_tasks, task_list};

const DAY: i64 = 86_400_000;
const D0: i64 = 1_704_067_200_000;

fn day(n: i64) -> i64 {
    D0 + n * DAY
}

fn sample_tree() -> Vec<gantt_rs::core::TaskRef> {
    task_list(vec![
        Task::project("p", day(0), day(6)).with_children(vec![
            Task::task("a", day(0), day(2)),
            Task::task("b", day(2), day(6))
                .with_children(vec![Task::task("b1", day(2), day(3))]),
        ]),
        Task::task("q", day(1), day(4)),
    ])
}

fn ids(rows: &[gantt_rs::core::TaskRow]) -> Vec<&str> {
    rows.iter().map(|row| row.id()).collect()
}

#[test]
fn without_sub_tasks_only_roots_are_rows() {
    let rows = flatten_tasks(&sample_tree(), false, None);
    assert_eq!(ids(&rows), vec!["p", "q"]);
    assert!(rows.iter().all(|row| row.depth == 0 && row.parent_id.is_none()));
}

#[test]
fn sub_tasks_follow_their_parent_in_pre_order() {
    let rows = flatten_tasks(&sample_tree(), true, None);
    assert_eq!(ids(&rows), vec!["p", "a", "b", "b1", "q"]);

    let depths: Vec<usize> = rows.iter().map(|row| row.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 0]);
    assert_eq!(rows[3].parent_id.as_deref(), Some("b"));
}

#[test]
fn collapsed_parents_hide_their_subtree() {
    let tasks = task_list(vec![
        Task::project("p", day(0), day(6))
            .with_children(vec![Task::task("a", day(0), day(2))])
            .with_hide_children(true),
    ]);
    let rows = flatten_tasks(&tasks, true, None);
    assert_eq!(ids(&rows), vec!["p"]);
}

#[test]
fn unscheduled_rows_use_the_fallback_range() {
    let tasks = task_list(vec![
        Task::unscheduled("u", TaskType::Project)
            .with_children(vec![Task::task("c", day(1), day(2))]),
    ]);

    let dropped = flatten_tasks(&tasks, true, None);
    assert!(dropped.is_empty());

    let rows = flatten_tasks(&tasks, true, Some((day(0), day(10))));
    assert_eq!(ids(&rows), vec!["u", "c"]);
    assert!(rows[0].uses_fallback_range);
    assert_eq!((rows[0].start, rows[0].end), (day(0), day(10)));
    assert!(!rows[1].uses_fallback_range);
}

#[test]
fn zero_duration_tasks_are_dropped_but_milestones_kept() {
    let tasks = task_list(vec![
        Task::task("zero", day(1), day(1)),
        Task::milestone("m", day(1)),
    ]);
    let rows = flatten_tasks(&tasks, false, None);
    assert_eq!(ids(&rows), vec!["m"]);
    assert_eq!(rows[0].start, rows[0].end);
}

#[test]
fn overlapping_children_flag_the_parent_row() {
    let overlapping = task_list(vec![Task::project("p", day(0), day(4)).with_children(vec![
        Task::task("a", day(0), day(2)),
        Task::task("b", day(1), day(3)),
    ])]);
    let touching = task_list(vec![Task::project("p", day(0), day(4)).with_children(vec![
        Task::task("a", day(0), day(2)),
        Task::task("b", day(2), day(3)),
    ])]);

    assert!(flatten_tasks(&overlapping, false, None)[0].has_overlapping_children);
    assert!(!flatten_tasks(&touching, false, None)[0].has_overlapping_children);
}
