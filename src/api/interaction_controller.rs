use tracing::debug;

use crate::core::TaskRef;
use crate::core::hierarchy::set_hide_children;
use crate::core::task_tree::find_task;
use crate::error::{GanttError, GanttResult};
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::{
    CommitResolution, GanttEngine, GanttHandler, GanttKey, PendingCommit, SelectionChange,
};

impl<R: Renderer> GanttEngine<R> {
    /// Marks `id` as hovered. Ignored while a gesture is active or when the
    /// task has no bar.
    pub fn pointer_enter(&mut self, id: &str) -> bool {
        if self.bar(id).is_none() || self.interaction.hovered_id() == Some(id) {
            return false;
        }
        if !self.interaction.on_pointer_enter(id) {
            return false;
        }
        self.emit_plugin_event(PluginEvent::HoverChanged {
            task_id: Some(id.to_owned()),
        });
        true
    }

    pub fn pointer_leave(&mut self) -> bool {
        if !self.interaction.on_pointer_leave() {
            return false;
        }
        self.emit_plugin_event(PluginEvent::HoverChanged { task_id: None });
        true
    }

    /// Changes the selection. `Ok(None)` when it already was `id`.
    pub fn select(&mut self, id: Option<&str>) -> GanttResult<Option<SelectionChange>> {
        let current = match id {
            Some(id) => Some(self.require_task(id)?),
            None => None,
        };
        let Some(previous_id) = self.interaction.select(id) else {
            return Ok(None);
        };
        let previous = previous_id
            .as_deref()
            .and_then(|previous| find_task(&self.tasks, previous).cloned());

        self.emit_plugin_event(PluginEvent::SelectionChanged {
            task_id: id.map(str::to_owned),
        });
        Ok(Some(SelectionChange { previous, current }))
    }

    /// Selects and reports both sides of the transition to `handler`.
    pub fn select_with<H: GanttHandler + ?Sized>(
        &mut self,
        id: Option<&str>,
        handler: &mut H,
    ) -> GanttResult<Option<SelectionChange>> {
        let change = self.select(id)?;
        if let Some(change) = &change {
            if let Some(previous) = &change.previous {
                handler.on_select(previous, false);
            }
            if let Some(current) = &change.current {
                handler.on_select(current, true);
            }
        }
        Ok(change)
    }

    /// A click selects the task.
    pub fn click(&mut self, id: &str) -> GanttResult<Option<SelectionChange>> {
        self.select(Some(id))
    }

    pub fn click_with<H: GanttHandler + ?Sized>(
        &mut self,
        id: &str,
        handler: &mut H,
    ) -> GanttResult<Option<SelectionChange>> {
        let change = self.select_with(Some(id), handler)?;
        let task = self.require_task(id)?;
        handler.on_click(&task);
        Ok(change)
    }

    pub fn double_click(&mut self, id: &str) -> GanttResult<TaskRef> {
        self.require_task(id)
    }

    pub fn double_click_with<H: GanttHandler + ?Sized>(
        &mut self,
        id: &str,
        handler: &mut H,
    ) -> GanttResult<TaskRef> {
        let task = self.double_click(id)?;
        handler.on_double_click(&task);
        Ok(task)
    }

    /// `Delete` removes the selected task; `Escape` cancels the active
    /// gesture, or clears the selection when idle.
    pub fn key_down(&mut self, key: GanttKey) -> GanttResult<Option<PendingCommit>> {
        match key {
            GanttKey::Delete => {
                if !self.interaction.is_idle() {
                    return Ok(None);
                }
                let Some(id) = self.interaction.selected_id().map(str::to_owned) else {
                    return Ok(None);
                };
                self.delete_task(&id)
            }
            GanttKey::Escape => {
                if !self.cancel_gesture() {
                    self.select(None)?;
                }
                Ok(None)
            }
        }
    }

    pub fn key_down_with<H: GanttHandler + ?Sized>(
        &mut self,
        key: GanttKey,
        handler: &mut H,
    ) -> GanttResult<Option<CommitResolution>> {
        let commit = self.key_down(key)?;
        self.settle_with(commit, handler)
    }

    /// Collapses or expands the children of `id`.
    ///
    /// Returns `Ok(false)` for tasks without displayed children. The state is
    /// read from the displayed tree, so children brought in by a pending
    /// re-parent count. The change is a view preference and is stored on the
    /// confirmed tree directly.
    pub fn toggle_expander(&mut self, id: &str) -> GanttResult<bool> {
        let task = self.require_task(id)?;
        if !task.has_children() {
            return Ok(false);
        }
        let collapsed = !task.hide_children.unwrap_or(false);
        let Some(tree) = set_hide_children(&self.base_tasks, id, collapsed) else {
            return Ok(false);
        };
        self.base_tasks = tree;
        self.rebuild_displayed_tasks();
        self.refresh_layout()?;
        self.forget_missing_tasks();

        debug!(task_id = %id, collapsed, "expander toggled");
        self.emit_plugin_event(PluginEvent::ExpanderToggled {
            task_id: id.to_owned(),
            collapsed,
        });
        Ok(true)
    }

    pub fn toggle_expander_with<H: GanttHandler + ?Sized>(
        &mut self,
        id: &str,
        handler: &mut H,
    ) -> GanttResult<bool> {
        if !self.toggle_expander(id)? {
            return Ok(false);
        }
        let task = self.require_task(id)?;
        handler.on_expander_click(&task);
        Ok(true)
    }

    fn require_task(&self, id: &str) -> GanttResult<TaskRef> {
        find_task(&self.tasks, id)
            .cloned()
            .ok_or_else(|| GanttError::UnknownTask(id.to_owned()))
    }
}
