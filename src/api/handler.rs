use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ReparentRejection, Task, TaskRef};

/// Reason a host refused a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("commit declined by host")]
    Declined,
    #[error("commit failed: {0}")]
    Failed(String),
}

/// Result of a host commit callback. Any `Err` rolls the edit back.
pub type CommitOutcome = Result<(), Rejection>;

/// Kind of edit carried by a pending commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitKind {
    DateChange,
    ProgressChange,
    Delete,
    HierarchyChange,
}

/// Optimistic edit waiting for the host's verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub id: u64,
    pub kind: CommitKind,
    /// The edited task as it appears in `tasks` (the removed node for deletes).
    pub task: TaskRef,
    /// New parent for hierarchy changes; `None` means the root list.
    pub new_parent: Option<TaskRef>,
    /// Full optimistic tree.
    pub tasks: Vec<TaskRef>,
}

/// Outcome of releasing a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// Zero net change; nothing to commit.
    Unchanged,
    Pending(PendingCommit),
}

impl Release {
    #[must_use]
    pub fn pending(&self) -> Option<&PendingCommit> {
        match self {
            Self::Unchanged => None,
            Self::Pending(commit) => Some(commit),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReparentOutcome {
    /// Hierarchy drag is switched off or the engine is read-only.
    Disabled,
    Rejected(ReparentRejection),
    Pending(PendingCommit),
}

/// How a settled commit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResolution {
    Accepted,
    RolledBack(Rejection),
}

/// Selection transition reported to hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub previous: Option<TaskRef>,
    pub current: Option<TaskRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GanttKey {
    Delete,
    Escape,
}

/// Host callbacks.
///
/// Commit-style methods decide whether an optimistic edit is kept; every
/// default accepts. Notification methods default to no-ops.
pub trait GanttHandler {
    fn on_date_change(&mut self, _task: &Task, _tasks: &[TaskRef]) -> CommitOutcome {
        Ok(())
    }

    fn on_progress_change(&mut self, _task: &Task, _tasks: &[TaskRef]) -> CommitOutcome {
        Ok(())
    }

    fn on_delete(&mut self, _task: &Task) -> CommitOutcome {
        Ok(())
    }

    fn on_hierarchy_change(
        &mut self,
        _task: &Task,
        _new_parent: Option<&Task>,
        _tasks: &[TaskRef],
    ) -> CommitOutcome {
        Ok(())
    }

    fn on_expander_click(&mut self, _task: &Task) {}

    fn on_select(&mut self, _task: &Task, _is_selected: bool) {}

    fn on_click(&mut self, _task: &Task) {}

    fn on_double_click(&mut self, _task: &Task) {}
}

/// Accepts everything and ignores notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl GanttHandler for AcceptAll {}

/// Routes a pending commit to the matching handler method.
pub(super) fn dispatch_commit<H: GanttHandler + ?Sized>(
    handler: &mut H,
    commit: &PendingCommit,
) -> CommitOutcome {
    match commit.kind {
        CommitKind::DateChange => handler.on_date_change(&commit.task, &commit.tasks),
        CommitKind::ProgressChange => handler.on_progress_change(&commit.task, &commit.tasks),
        CommitKind::Delete => handler.on_delete(&commit.task),
        CommitKind::HierarchyChange => handler.on_hierarchy_change(
            &commit.task,
            commit.new_parent.as_deref(),
            &commit.tasks,
        ),
    }
}
