use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use crate::core::hierarchy::{TreeEdit, reparent, remove_task};
use crate::core::task_tree::find_task;
use crate::core::{BarTask, TaskRef};
use crate::error::{GanttError, GanttResult};
use crate::extensions::PluginEvent;
use crate::interaction::GanttAction;
use crate::render::Renderer;

use super::handler::dispatch_commit;
use super::{
    CommitKind, CommitOutcome, CommitResolution, GanttEngine, GanttHandler, PendingCommit,
    ReparentOutcome,
};

/// Edit recorded until the host settles it.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PendingEdit {
    pub(super) kind: CommitKind,
    pub(super) edit: TreeEdit,
    /// Bar before the edit, when the edit came from a gesture.
    pub(super) snapshot: Option<BarTask>,
}

/// In-flight commits in creation order.
#[derive(Debug, Default)]
pub(super) struct CommitLedger {
    next_id: u64,
    pending: IndexMap<u64, PendingEdit>,
}

impl CommitLedger {
    fn open(&mut self, pending: PendingEdit) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.insert(self.next_id, pending);
        self.next_id
    }

    pub(super) fn is_locked(&self, task_id: &str) -> bool {
        self.pending
            .values()
            .any(|pending| pending.edit.task_id() == task_id)
    }

    pub(super) fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn pending_commit_ids(&self) -> Vec<u64> {
        self.commits.pending.keys().copied().collect()
    }

    #[must_use]
    pub fn pending_commit_count(&self) -> usize {
        self.commits.len()
    }

    /// True when `task_id` has a commit in flight.
    #[must_use]
    pub fn is_task_locked(&self, task_id: &str) -> bool {
        self.commits.is_locked(task_id)
    }

    /// Pre-gesture bar recorded for a pending commit.
    #[must_use]
    pub fn commit_snapshot(&self, commit_id: u64) -> Option<&BarTask> {
        self.commits
            .pending
            .get(&commit_id)
            .and_then(|pending| pending.snapshot.as_ref())
    }

    /// Adopts (`Ok`) or rolls back (`Err`) a pending commit.
    ///
    /// Acceptance replays the edit on the confirmed tree, so commits settled
    /// out of order never overwrite each other. Rollback drops the edit and
    /// rebuilds the displayed tree without it.
    pub fn settle_commit(
        &mut self,
        commit_id: u64,
        outcome: CommitOutcome,
    ) -> GanttResult<CommitResolution> {
        let pending = self
            .commits
            .pending
            .shift_remove(&commit_id)
            .ok_or(GanttError::UnknownCommit(commit_id))?;
        let task_id = pending.edit.task_id().to_owned();

        let (resolution, event) = match outcome {
            Ok(()) => {
                match pending.edit.apply(&self.base_tasks) {
                    Some(tree) => self.base_tasks = tree,
                    None => warn!(
                        commit_id,
                        task_id = %task_id,
                        "accepted edit no longer applies to the confirmed tree"
                    ),
                }
                info!(commit_id, task_id = %task_id, kind = ?pending.kind, "commit accepted");
                (
                    CommitResolution::Accepted,
                    PluginEvent::CommitAccepted {
                        commit_id,
                        task_id,
                    },
                )
            }
            Err(rejection) => {
                warn!(
                    commit_id,
                    task_id = %task_id,
                    kind = ?pending.kind,
                    reason = %rejection,
                    "commit rolled back"
                );
                (
                    CommitResolution::RolledBack(rejection.clone()),
                    PluginEvent::CommitRolledBack {
                        commit_id,
                        task_id,
                        reason: rejection.to_string(),
                    },
                )
            }
        };

        self.rebuild_displayed_tasks();
        self.refresh_layout()?;
        self.forget_missing_tasks();
        self.emit_plugin_event(event);
        Ok(resolution)
    }

    /// Deletes `id` optimistically. `Ok(None)` when deletion is not permitted.
    pub fn delete_task(&mut self, id: &str) -> GanttResult<Option<PendingCommit>> {
        let task = find_task(&self.tasks, id)
            .cloned()
            .ok_or_else(|| GanttError::UnknownTask(id.to_owned()))?;
        if self.commits.is_locked(id) {
            return Err(GanttError::TaskLocked(id.to_owned()));
        }
        if self.config.readonly || !self.config.deletable || task.is_disabled {
            debug!(task_id = %id, "delete not permitted");
            return Ok(None);
        }
        self.interaction.mark(GanttAction::Delete);
        let snapshot = self.bar(id).cloned();
        let commit = self.open_commit(
            CommitKind::Delete,
            TreeEdit::Delete { id: id.to_owned() },
            snapshot,
        )?;
        self.interaction.reset_action();
        Ok(commit)
    }

    pub fn delete_task_with<H: GanttHandler + ?Sized>(
        &mut self,
        id: &str,
        handler: &mut H,
    ) -> GanttResult<Option<CommitResolution>> {
        let commit = self.delete_task(id)?;
        self.settle_with(commit, handler)
    }

    /// Moves `id` under `new_parent` (the root list for `None`).
    ///
    /// Illegal targets are reported as `Rejected` and leave the tree as is.
    pub fn reparent(
        &mut self,
        id: &str,
        new_parent: Option<&str>,
    ) -> GanttResult<ReparentOutcome> {
        if !self.config.hierarchy_drag || self.config.readonly {
            return Ok(ReparentOutcome::Disabled);
        }
        if self.commits.is_locked(id) {
            return Err(GanttError::TaskLocked(id.to_owned()));
        }
        if let Err(rejection) = reparent(&self.tasks, id, new_parent) {
            debug!(task_id = %id, reason = %rejection, "re-parent rejected");
            return Ok(ReparentOutcome::Rejected(rejection));
        }

        self.interaction.mark(GanttAction::HierarchyChange);
        let snapshot = self.bar(id).cloned();
        let commit = self.open_commit(
            CommitKind::HierarchyChange,
            TreeEdit::Reparent {
                id: id.to_owned(),
                new_parent: new_parent.map(str::to_owned),
            },
            snapshot,
        )?;
        self.interaction.reset_action();
        Ok(match commit {
            Some(commit) => ReparentOutcome::Pending(commit),
            None => ReparentOutcome::Disabled,
        })
    }

    pub fn reparent_with<H: GanttHandler + ?Sized>(
        &mut self,
        id: &str,
        new_parent: Option<&str>,
        handler: &mut H,
    ) -> GanttResult<ReparentOutcome> {
        let outcome = self.reparent(id, new_parent)?;
        if let ReparentOutcome::Pending(commit) = &outcome {
            self.settle_with(Some(commit.clone()), handler)?;
        }
        Ok(outcome)
    }

    /// Applies `edit` optimistically and records it as pending.
    ///
    /// `Ok(None)` when the edit does not apply to the displayed tree.
    pub(super) fn open_commit(
        &mut self,
        kind: CommitKind,
        edit: TreeEdit,
        snapshot: Option<BarTask>,
    ) -> GanttResult<Option<PendingCommit>> {
        let task_id = edit.task_id().to_owned();
        let removed = match &edit {
            TreeEdit::Delete { id } => remove_task(&self.tasks, id).map(|(_, node)| node),
            _ => None,
        };
        let Some(tree) = edit.apply(&self.tasks) else {
            trace!(task_id = %task_id, "edit does not apply to the displayed tree");
            return Ok(None);
        };

        let task = match removed {
            Some(node) => node,
            None => match find_task(&tree, &task_id) {
                Some(node) => node.clone(),
                None => return Ok(None),
            },
        };
        let new_parent = match &edit {
            TreeEdit::Reparent {
                new_parent: Some(parent),
                ..
            } => find_task(&tree, parent).cloned(),
            _ => None,
        };

        let commit_id = self.commits.open(PendingEdit {
            kind,
            edit,
            snapshot,
        });
        debug!(commit_id, task_id = %task_id, kind = ?kind, "commit requested");

        self.replace_displayed_tasks(tree.clone());
        self.refresh_layout()?;
        self.forget_missing_tasks();
        self.emit_plugin_event(PluginEvent::CommitRequested {
            commit_id,
            task_id,
        });

        Ok(Some(PendingCommit {
            id: commit_id,
            kind,
            task,
            new_parent,
            tasks: tree,
        }))
    }

    /// Asks `handler` about `commit` and settles it with the answer.
    pub(super) fn settle_with<H: GanttHandler + ?Sized>(
        &mut self,
        commit: Option<PendingCommit>,
        handler: &mut H,
    ) -> GanttResult<Option<CommitResolution>> {
        let Some(commit) = commit else {
            return Ok(None);
        };
        let outcome = dispatch_commit(handler, &commit);
        self.settle_commit(commit.id, outcome).map(Some)
    }

    /// Displayed tree = confirmed tree + every pending edit in order.
    pub(super) fn rebuild_displayed_tasks(&mut self) {
        let mut tree: Vec<TaskRef> = self.base_tasks.clone();
        for (commit_id, pending) in &self.commits.pending {
            match pending.edit.apply(&tree) {
                Some(next) => tree = next,
                None => trace!(commit_id, "pending edit skipped on replay"),
            }
        }
        self.replace_displayed_tasks(tree);
    }
}
