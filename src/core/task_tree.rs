//! Read-only queries over the task tree.

use std::collections::HashSet;

use tracing::debug;

use crate::core::types::TaskRef;
use crate::error::{GanttError, GanttResult};

/// Index path from the root list down to a node (`[root_idx, child_idx, ...]`).
pub type TaskPath = Vec<usize>;

/// Visits every node in depth-first pre-order, regardless of collapse state.
pub fn walk_tasks<F>(tasks: &[TaskRef], visit: &mut F)
where
    F: FnMut(&TaskRef, usize),
{
    fn walk<F>(tasks: &[TaskRef], depth: usize, visit: &mut F)
    where
        F: FnMut(&TaskRef, usize),
    {
        for task in tasks {
            visit(task, depth);
            walk(&task.children, depth + 1, visit);
        }
    }
    walk(tasks, 0, visit);
}

/// Checks ids: non-empty and unique across the tree.
///
/// Inverted spans are not an error here; the flattener drops those rows.
pub fn validate_tree(tasks: &[TaskRef]) -> GanttResult<()> {
    let mut seen = HashSet::new();
    let mut result = Ok(());
    walk_tasks(tasks, &mut |task, _| {
        if result.is_err() {
            return;
        }
        if task.id.is_empty() {
            result = Err(GanttError::InvalidData("task id must not be empty".to_owned()));
            return;
        }
        if !seen.insert(task.id.clone()) {
            result = Err(GanttError::DuplicateTaskId(task.id.clone()));
            return;
        }
        if task.has_inverted_span() {
            debug!(task_id = %task.id, "task ends before it starts");
        }
    });
    result
}

#[must_use]
pub fn find_path(tasks: &[TaskRef], id: &str) -> Option<TaskPath> {
    for (index, task) in tasks.iter().enumerate() {
        if task.id == id {
            return Some(vec![index]);
        }
        if let Some(mut tail) = find_path(&task.children, id) {
            tail.insert(0, index);
            return Some(tail);
        }
    }
    None
}

#[must_use]
pub fn find_task<'a>(tasks: &'a [TaskRef], id: &str) -> Option<&'a TaskRef> {
    let path = find_path(tasks, id)?;
    node_at(tasks, &path)
}

#[must_use]
pub fn node_at<'a>(tasks: &'a [TaskRef], path: &[usize]) -> Option<&'a TaskRef> {
    let (&first, rest) = path.split_first()?;
    let mut node = tasks.get(first)?;
    for &index in rest {
        node = node.children.get(index)?;
    }
    Some(node)
}

/// Parent of `id`, or `None` for root-level tasks and unknown ids.
#[must_use]
pub fn parent_of<'a>(tasks: &'a [TaskRef], id: &str) -> Option<&'a TaskRef> {
    let path = find_path(tasks, id)?;
    if path.len() < 2 {
        return None;
    }
    node_at(tasks, &path[..path.len() - 1])
}

/// True when `candidate` is `ancestor` itself or lies anywhere in its subtree.
#[must_use]
pub fn is_self_or_descendant(tasks: &[TaskRef], ancestor: &str, candidate: &str) -> bool {
    if ancestor == candidate {
        return true;
    }
    find_task(tasks, ancestor)
        .map(|node| find_path(&node.children, candidate).is_some())
        .unwrap_or(false)
}

#[must_use]
pub fn count_tasks(tasks: &[TaskRef]) -> usize {
    let mut count = 0;
    walk_tasks(tasks, &mut |_, _| count += 1);
    count
}
