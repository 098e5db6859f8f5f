use tracing::{debug, trace};

use crate::core::{TaskTypeInternal, TreeEdit};
use crate::error::{GanttError, GanttResult};
use crate::extensions::PluginEvent;
use crate::interaction::{BarMoveAction, GestureInput, GestureResult, translate_gesture};
use crate::render::Renderer;

use super::{CommitKind, CommitResolution, GanttEngine, GanttHandler, Release};

impl<R: Renderer> GanttEngine<R> {
    /// Starts a pointer gesture on the bar of `id`.
    ///
    /// Returns `Ok(false)` when permissions forbid the gesture; the engine
    /// stays idle in that case.
    pub fn begin_gesture(
        &mut self,
        id: &str,
        action: BarMoveAction,
        pointer_x: f64,
    ) -> GanttResult<bool> {
        if !pointer_x.is_finite() {
            return Err(GanttError::InvalidData(
                "gesture pointer x must be finite".to_owned(),
            ));
        }
        let snapshot = self
            .bar(id)
            .cloned()
            .ok_or_else(|| GanttError::UnknownTask(id.to_owned()))?;
        if let Some(active) = self.interaction.active_gesture() {
            return Err(GanttError::GestureInProgress(active.snapshot.id().to_owned()));
        }
        if self.commits.is_locked(id) {
            return Err(GanttError::TaskLocked(id.to_owned()));
        }
        if !self.gesture_permitted(snapshot.task.is_disabled, snapshot.type_internal, action) {
            debug!(task_id = %id, action = ?action, "gesture not permitted");
            return Ok(false);
        }

        let previous_selection = self.interaction.selected_id().map(str::to_owned);
        let had_hover = self.interaction.hovered_id().is_some();
        self.interaction.begin_gesture(action, snapshot, pointer_x)?;
        debug!(task_id = %id, action = ?action, pointer_x, "gesture started");

        if had_hover {
            self.emit_plugin_event(PluginEvent::HoverChanged { task_id: None });
        }
        if previous_selection.as_deref() != Some(id) {
            self.emit_plugin_event(PluginEvent::SelectionChanged {
                task_id: Some(id.to_owned()),
            });
        }
        self.emit_plugin_event(PluginEvent::GestureStarted {
            task_id: id.to_owned(),
            action,
        });
        Ok(true)
    }

    /// Feeds a pointer sample to the active gesture and returns the
    /// candidate geometry.
    pub fn pointer_move(&mut self, pointer_x: f64) -> GanttResult<GestureResult> {
        let gesture = self
            .interaction
            .active_gesture()
            .ok_or(GanttError::NoActiveGesture)?;
        let input = GestureInput {
            pointer_x,
            x_step: self.config.column_width,
            time_step_ms: self.config.time_step(),
            init_x1_delta: gesture.init_x1_delta,
            rtl: self.config.rtl,
        };
        let action = gesture.action;
        let result = translate_gesture(action, &gesture.snapshot, input);
        let moved = result.changed != gesture.changed;
        let task_id = gesture.snapshot.id().to_owned();

        self.interaction.update_gesture(pointer_x, result.clone())?;
        if moved {
            trace!(task_id = %task_id, x1 = result.changed.x1, x2 = result.changed.x2, "gesture geometry changed");
            self.emit_plugin_event(PluginEvent::GestureChanged { task_id, action });
        }
        Ok(result)
    }

    /// Drops the active gesture without committing. Returns `false` when
    /// nothing was active.
    pub fn cancel_gesture(&mut self) -> bool {
        let Ok(gesture) = self.interaction.finish_gesture() else {
            return false;
        };
        debug!(task_id = %gesture.snapshot.id(), "gesture cancelled");
        self.emit_plugin_event(PluginEvent::GestureCancelled {
            task_id: gesture.snapshot.id().to_owned(),
        });
        true
    }

    /// Ends the active gesture.
    ///
    /// A release whose dates and progress equal the pre-gesture snapshot is
    /// `Unchanged`; otherwise the edit is applied optimistically and returned
    /// as a pending commit.
    pub fn release_gesture(&mut self) -> GanttResult<Release> {
        let gesture = self.interaction.finish_gesture()?;
        let snapshot = &gesture.snapshot;
        let changed = &gesture.changed;
        let task_id = snapshot.id().to_owned();

        let (kind, edit) = match gesture.action {
            BarMoveAction::Progress => {
                if changed.progress == snapshot.progress {
                    debug!(task_id = %task_id, "progress gesture released without change");
                    return Ok(Release::Unchanged);
                }
                (
                    CommitKind::ProgressChange,
                    TreeEdit::Progress {
                        id: task_id.clone(),
                        progress: changed.progress,
                    },
                )
            }
            action => {
                if changed.start == snapshot.start && changed.end == snapshot.end {
                    debug!(task_id = %task_id, action = ?action, "date gesture released without change");
                    return Ok(Release::Unchanged);
                }
                (
                    CommitKind::DateChange,
                    TreeEdit::Dates {
                        id: task_id.clone(),
                        start: changed.start,
                        end: changed.end,
                        cascade: self.config.cascade_shift && action == BarMoveAction::Move,
                    },
                )
            }
        };

        debug!(task_id = %task_id, action = ?gesture.action, "gesture released");
        let commit = self.open_commit(kind, edit, Some(gesture.snapshot))?;
        Ok(match commit {
            Some(commit) => Release::Pending(commit),
            None => Release::Unchanged,
        })
    }

    /// Releases the active gesture and settles it through `handler`.
    pub fn release_gesture_with<H: GanttHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> GanttResult<Option<CommitResolution>> {
        match self.release_gesture()? {
            Release::Unchanged => Ok(None),
            Release::Pending(commit) => self.settle_with(Some(commit), handler),
        }
    }

    fn gesture_permitted(
        &self,
        is_disabled: bool,
        type_internal: TaskTypeInternal,
        action: BarMoveAction,
    ) -> bool {
        if self.config.readonly || is_disabled {
            return false;
        }
        let milestone = type_internal == TaskTypeInternal::Milestone;
        match action {
            BarMoveAction::Progress => self.config.progress_changeable && !milestone,
            BarMoveAction::Start | BarMoveAction::End if milestone => false,
            _ => self.config.date_changeable.allows(action),
        }
    }
}
