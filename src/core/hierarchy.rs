//! Tree edits that produce a new task tree.
//!
//! Every function here path-copies: nodes along the edited path are rebuilt,
//! every other subtree is shared with the input through its `Arc`. Project
//! ancestors of an edited node are re-aggregated on the way back up.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::task_tree::{find_path, find_task, is_self_or_descendant};
use crate::core::types::{Task, TaskRef, TaskType, Timestamp};

/// Why a re-parent request was refused. The tree is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ReparentRejection {
    #[error("task `{0}` cannot become its own parent")]
    SelfTarget(String),
    #[error("task `{task}` cannot move under its descendant `{target}`")]
    DescendantTarget { task: String, target: String },
    #[error("unknown task `{0}`")]
    UnknownTask(String),
    #[error("unknown re-parent target `{0}`")]
    UnknownTarget(String),
}

/// A recorded tree edit, replayable against a newer tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeEdit {
    Dates {
        id: String,
        start: Timestamp,
        end: Timestamp,
        cascade: bool,
    },
    Progress {
        id: String,
        progress: u8,
    },
    Delete {
        id: String,
    },
    Reparent {
        id: String,
        new_parent: Option<String>,
    },
}

impl TreeEdit {
    #[must_use]
    pub fn task_id(&self) -> &str {
        match self {
            Self::Dates { id, .. }
            | Self::Progress { id, .. }
            | Self::Delete { id }
            | Self::Reparent { id, .. } => id,
        }
    }

    /// Applies the edit. `None` when the edit no longer applies (its task
    /// disappeared or a re-parent became illegal).
    #[must_use]
    pub fn apply(&self, tasks: &[TaskRef]) -> Option<Vec<TaskRef>> {
        match self {
            Self::Dates {
                id,
                start,
                end,
                cascade,
            } => apply_date_change(tasks, id, *start, *end, *cascade),
            Self::Progress { id, progress } => set_progress(tasks, id, *progress),
            Self::Delete { id } => remove_task(tasks, id).map(|(tree, _)| tree),
            Self::Reparent { id, new_parent } => reparent(tasks, id, new_parent.as_deref()).ok(),
        }
    }
}

/// Replaces the node `id` with `edit(node)` and re-aggregates its ancestors.
#[must_use]
pub fn update_task<F>(tasks: &[TaskRef], id: &str, edit: F) -> Option<Vec<TaskRef>>
where
    F: FnOnce(&Task) -> Task,
{
    let path = find_path(tasks, id)?;
    let (&index, parent_path) = path.split_last()?;
    Some(rebuild_list(tasks, parent_path, |siblings| {
        let mut out = siblings.to_vec();
        if let Some(slot) = out.get_mut(index) {
            let next = edit(slot.as_ref());
            *slot = Arc::new(next);
        }
        out
    }))
}

/// Recomputes a project's bounds and progress from its direct children.
///
/// Bounds are the min start / max end over scheduled children; progress is
/// the rounded mean over all children. Non-projects and childless projects
/// are left untouched.
pub fn aggregate_project(task: &mut Task) {
    if task.kind != TaskType::Project || task.children.is_empty() {
        return;
    }
    let bounds = task
        .children
        .iter()
        .filter_map(|child| child.span())
        .reduce(|(min, max), (start, end)| (min.min(start), max.max(end)));
    if let Some((start, end)) = bounds {
        task.start = Some(start);
        task.end = Some(end);
    }
    let total: u32 = task.children.iter().map(|child| u32::from(child.progress)).sum();
    let count = task.children.len() as f64;
    task.progress = (f64::from(total) / count).round().min(100.0) as u8;
}

/// Shifts a node and its whole subtree by `delta_ms`, keeping relative offsets.
#[must_use]
pub fn shift_subtree(task: &Task, delta_ms: i64) -> Task {
    let mut shifted = task.clone();
    shifted.start = task.start.map(|start| start + delta_ms);
    shifted.end = task.end.map(|end| end + delta_ms);
    shifted.children = task
        .children
        .iter()
        .map(|child| Arc::new(shift_subtree(child, delta_ms)))
        .collect();
    shifted
}

/// Shifts every row on the drag side of `id`, in row (pre-order) order.
///
/// With `delta_ms < 0` every row before `id` moves, with `delta_ms > 0`
/// every row after it. Unrelated rows move with their whole subtree. `id`
/// and its descendants are left as is; its ancestors shift their own bounds
/// only (they are rows before `id`) and projects among them re-aggregate.
#[must_use]
pub fn cascade_shift(tasks: &[TaskRef], id: &str, delta_ms: i64) -> Option<Vec<TaskRef>> {
    let path = find_path(tasks, id)?;
    if delta_ms == 0 {
        return Some(tasks.to_vec());
    }
    Some(cascade_level(tasks, &path, delta_ms))
}

fn cascade_level(nodes: &[TaskRef], path: &[usize], delta_ms: i64) -> Vec<TaskRef> {
    let Some((&anchor, rest)) = path.split_first() else {
        return nodes.to_vec();
    };
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            if index == anchor {
                if rest.is_empty() {
                    return node.clone();
                }
                let mut ancestor = (**node).clone();
                if delta_ms < 0 {
                    ancestor.start = node.start.map(|start| start + delta_ms);
                    ancestor.end = node.end.map(|end| end + delta_ms);
                }
                ancestor.children = cascade_level(&node.children, rest, delta_ms);
                aggregate_project(&mut ancestor);
                Arc::new(ancestor)
            } else if (index < anchor && delta_ms < 0) || (index > anchor && delta_ms > 0) {
                Arc::new(shift_subtree(node, delta_ms))
            } else {
                node.clone()
            }
        })
        .collect()
}

/// Sets new bounds on `id` and propagates them.
///
/// When both bounds move by the same non-zero delta the edit is a move: the
/// task's own descendants travel with it and, with `cascade` on, the
/// drag-side rows shift too. Resizes touch only the task and its
/// ancestors.
#[must_use]
pub fn apply_date_change(
    tasks: &[TaskRef],
    id: &str,
    start: Timestamp,
    end: Timestamp,
    cascade: bool,
) -> Option<Vec<TaskRef>> {
    let current = find_task(tasks, id)?;
    let end = if current.kind == TaskType::Milestone {
        start
    } else {
        end
    };
    let move_delta = match current.span() {
        Some((old_start, old_end)) if start - old_start == end - old_end => start - old_start,
        _ => 0,
    };

    let updated = update_task(tasks, id, |task| {
        let mut next = if move_delta != 0 {
            shift_subtree(task, move_delta)
        } else {
            task.clone()
        };
        next.start = Some(start);
        next.end = Some(end);
        next
    })?;

    if cascade && move_delta != 0 {
        cascade_shift(&updated, id, move_delta)
    } else {
        Some(updated)
    }
}

/// Sets progress (clamped to 100) and re-aggregates project ancestors.
#[must_use]
pub fn set_progress(tasks: &[TaskRef], id: &str, progress: u8) -> Option<Vec<TaskRef>> {
    update_task(tasks, id, |task| {
        let mut next = task.clone();
        next.progress = progress.min(100);
        next
    })
}

/// Removes `id` with its subtree; returns the new tree and the removed node.
#[must_use]
pub fn remove_task(tasks: &[TaskRef], id: &str) -> Option<(Vec<TaskRef>, TaskRef)> {
    let path = find_path(tasks, id)?;
    let (&index, parent_path) = path.split_last()?;
    let mut removed = None;
    let tree = rebuild_list(tasks, parent_path, |siblings| {
        let mut out = siblings.to_vec();
        if index < out.len() {
            removed = Some(out.remove(index));
        }
        out
    });
    removed.map(|node| (tree, node))
}

/// Moves `id` (with its subtree) to the end of `new_parent`'s children, or
/// to the end of the root list when `new_parent` is `None`.
pub fn reparent(
    tasks: &[TaskRef],
    id: &str,
    new_parent: Option<&str>,
) -> Result<Vec<TaskRef>, ReparentRejection> {
    if find_path(tasks, id).is_none() {
        return Err(ReparentRejection::UnknownTask(id.to_owned()));
    }
    if let Some(target) = new_parent {
        if target == id {
            debug!(task_id = %id, "re-parent rejected: self target");
            return Err(ReparentRejection::SelfTarget(id.to_owned()));
        }
        if find_path(tasks, target).is_none() {
            debug!(task_id = %id, target = %target, "re-parent rejected: unknown target");
            return Err(ReparentRejection::UnknownTarget(target.to_owned()));
        }
        if is_self_or_descendant(tasks, id, target) {
            debug!(task_id = %id, target = %target, "re-parent rejected: descendant target");
            return Err(ReparentRejection::DescendantTarget {
                task: id.to_owned(),
                target: target.to_owned(),
            });
        }
    }

    let Some((detached, moved)) = remove_task(tasks, id) else {
        return Err(ReparentRejection::UnknownTask(id.to_owned()));
    };
    let target_path = match new_parent {
        Some(target) => {
            find_path(&detached, target).ok_or_else(|| ReparentRejection::UnknownTarget(target.to_owned()))?
        }
        None => Vec::new(),
    };
    Ok(rebuild_list(&detached, &target_path, |children| {
        let mut out = children.to_vec();
        out.push(moved);
        out
    }))
}

/// Flips the collapse state of a node that has children.
#[must_use]
pub fn toggle_hide_children(tasks: &[TaskRef], id: &str) -> Option<Vec<TaskRef>> {
    let task = find_task(tasks, id)?;
    if !task.has_children() {
        return None;
    }
    set_hide_children(tasks, id, !task.hide_children.unwrap_or(false))
}

/// Sets the collapse state of `id`, whether or not it has children in
/// `tasks`. Replayed edits may give it children later; a childless node
/// never shows the flag on its bar.
#[must_use]
pub fn set_hide_children(tasks: &[TaskRef], id: &str, hidden: bool) -> Option<Vec<TaskRef>> {
    update_task(tasks, id, |task| {
        let mut next = task.clone();
        next.hide_children = Some(hidden);
        next
    })
}

/// Rebuilds the child list found at `parent_path` (the root list when empty)
/// and every node above it.
fn rebuild_list<F>(nodes: &[TaskRef], parent_path: &[usize], edit: F) -> Vec<TaskRef>
where
    F: FnOnce(&[TaskRef]) -> Vec<TaskRef>,
{
    let Some((&index, rest)) = parent_path.split_first() else {
        return edit(nodes);
    };
    let Some(node) = nodes.get(index) else {
        return nodes.to_vec();
    };
    let mut parent = (**node).clone();
    parent.children = rebuild_list(&node.children, rest, edit);
    normalize_container(&mut parent);
    aggregate_project(&mut parent);

    let mut out = nodes.to_vec();
    out[index] = Arc::new(parent);
    out
}

/// Keeps the expander tri-state consistent with the child count.
fn normalize_container(task: &mut Task) {
    if task.children.is_empty() {
        task.hide_children = None;
    } else if task.hide_children.is_none() {
        task.hide_children = Some(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::task_list;

    #[test]
    fn untouched_subtrees_are_shared() {
        let tasks = task_list(vec![
            Task::project("p", 0, 10).with_children(vec![Task::task("a", 0, 10)]),
            Task::project("q", 0, 10).with_children(vec![Task::task("b", 0, 10)]),
        ]);
        let updated = set_progress(&tasks, "a", 50).expect("known task");
        assert!(Arc::ptr_eq(&tasks[1], &updated[1]));
        assert!(!Arc::ptr_eq(&tasks[0], &updated[0]));
        assert_eq!(updated[0].progress, 50);
    }

    #[test]
    fn removing_last_child_clears_expander() {
        let tasks = task_list(vec![
            Task::project("p", 0, 10).with_children(vec![Task::task("a", 0, 10)]),
        ]);
        let (tree, removed) = remove_task(&tasks, "a").expect("known task");
        assert_eq!(removed.id, "a");
        assert_eq!(tree[0].hide_children, None);
    }
}
