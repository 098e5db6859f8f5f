use tracing::debug;

use crate::core::types::{TaskRef, TaskType, Timestamp};

/// One render row produced from the task tree.
///
/// `start`/`end` are the resolved bounds used for geometry: the task's own
/// span, or the fallback range for unscheduled container rows. Milestones
/// always resolve to `end == start`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task: TaskRef,
    pub start: Timestamp,
    pub end: Timestamp,
    pub depth: usize,
    pub parent_id: Option<String>,
    pub has_overlapping_children: bool,
    pub uses_fallback_range: bool,
}

impl TaskRow {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.task.id
    }
}

/// Flattens the tree into render order (depth-first pre-order).
///
/// Children follow their parent only when `show_sub_task` is on and the parent
/// is not collapsed. Rows without a schedule take `fallback_range`; without
/// one they are dropped along with their subtree, as are rows whose duration
/// is negative (or zero, for anything but a milestone).
#[must_use]
pub fn flatten_tasks(
    tasks: &[TaskRef],
    show_sub_task: bool,
    fallback_range: Option<(Timestamp, Timestamp)>,
) -> Vec<TaskRow> {
    let mut rows = Vec::with_capacity(tasks.len());
    push_rows(tasks, show_sub_task, fallback_range, 0, None, &mut rows);
    rows
}

fn push_rows(
    tasks: &[TaskRef],
    show_sub_task: bool,
    fallback_range: Option<(Timestamp, Timestamp)>,
    depth: usize,
    parent_id: Option<&str>,
    rows: &mut Vec<TaskRow>,
) {
    for task in tasks {
        let (span, uses_fallback_range) = match task.span() {
            Some(span) => (span, false),
            None => match fallback_range {
                Some(range) => (range, true),
                None => {
                    debug!(task_id = %task.id, "dropping unscheduled row without fallback range");
                    continue;
                }
            },
        };
        let (start, end) = if task.kind == TaskType::Milestone {
            (span.0, span.0)
        } else {
            span
        };
        if end < start || (end == start && task.kind != TaskType::Milestone) {
            debug!(task_id = %task.id, start, end, "dropping row with degenerate duration");
            continue;
        }

        rows.push(TaskRow {
            task: task.clone(),
            start,
            end,
            depth,
            parent_id: parent_id.map(str::to_owned),
            has_overlapping_children: has_overlapping_children(&task.children),
            uses_fallback_range,
        });

        if show_sub_task && task.has_children() && task.hide_children != Some(true) {
            push_rows(
                &task.children,
                show_sub_task,
                fallback_range,
                depth + 1,
                Some(&task.id),
                rows,
            );
        }
    }
}

/// True when any two scheduled siblings overlap in time.
///
/// Purely diagnostic: overlapping children are still rendered.
#[must_use]
pub fn has_overlapping_children(children: &[TaskRef]) -> bool {
    let spans: Vec<(Timestamp, Timestamp)> =
        children.iter().filter_map(|child| child.span()).collect();
    spans.iter().enumerate().any(|(i, &(start1, end1))| {
        spans[i + 1..]
            .iter()
            .any(|&(start2, end2)| start1 < end2 && end1 > start2)
    })
}
