pub mod gesture;

use serde::{Deserialize, Serialize};

use crate::core::bar_geometry::BarTask;
use crate::error::{GanttError, GanttResult};

pub use gesture::{BarMoveAction, GestureInput, GestureResult, progress_by_x, translate_gesture};

/// Current interaction kind. `Idle` is the empty action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GanttAction {
    #[default]
    Idle,
    Select,
    MouseEnter,
    MouseLeave,
    Move,
    Start,
    End,
    Progress,
    Delete,
    HierarchyChange,
}

impl From<BarMoveAction> for GanttAction {
    fn from(action: BarMoveAction) -> Self {
        match action {
            BarMoveAction::Move => Self::Move,
            BarMoveAction::Start => Self::Start,
            BarMoveAction::End => Self::End,
            BarMoveAction::Progress => Self::Progress,
        }
    }
}

impl GanttAction {
    /// True for the pointer-driven editing gestures.
    #[must_use]
    pub fn is_gesture(self) -> bool {
        matches!(self, Self::Move | Self::Start | Self::End | Self::Progress)
    }
}

/// Ephemeral interaction state shared with plugins and renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GanttEvent {
    pub action: GanttAction,
    /// Candidate geometry of the bar being edited.
    pub changed_task: Option<BarTask>,
    /// Pre-gesture snapshot used for rollback.
    pub original_selected_task: Option<BarTask>,
}

/// Pointer gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGesture {
    pub action: BarMoveAction,
    pub snapshot: BarTask,
    pub changed: BarTask,
    pub init_x1_delta: f64,
    pub is_changed: bool,
}

/// Selection, hover and gesture state machine.
///
/// At most one gesture is active. Hover only registers while idle and is
/// cleared when a gesture starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    event: GanttEvent,
    selected_id: Option<String>,
    hovered_id: Option<String>,
    gesture: Option<ActiveGesture>,
    cursor_x: Option<f64>,
}

impl InteractionState {
    #[must_use]
    pub fn event(&self) -> &GanttEvent {
        &self.event
    }

    #[must_use]
    pub fn action(&self) -> GanttAction {
        self.event.action
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.gesture.is_none()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    #[must_use]
    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered_id.as_deref()
    }

    #[must_use]
    pub fn active_gesture(&self) -> Option<&ActiveGesture> {
        self.gesture.as_ref()
    }

    #[must_use]
    pub fn cursor_x(&self) -> Option<f64> {
        self.cursor_x
    }

    /// Returns `false` when a gesture is active and hover is ignored.
    pub fn on_pointer_enter(&mut self, id: &str) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        self.hovered_id = Some(id.to_owned());
        self.event.action = GanttAction::MouseEnter;
        true
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        if self.gesture.is_some() || self.hovered_id.is_none() {
            return false;
        }
        self.hovered_id = None;
        self.event.action = GanttAction::MouseLeave;
        true
    }

    /// Changes the selection; returns the previously selected id when the
    /// selection actually changed.
    pub fn select(&mut self, id: Option<&str>) -> Option<Option<String>> {
        if self.selected_id.as_deref() == id {
            return None;
        }
        let previous = self.selected_id.take();
        self.selected_id = id.map(str::to_owned);
        if self.gesture.is_none() {
            self.event.action = GanttAction::Select;
        }
        Some(previous)
    }

    pub fn begin_gesture(
        &mut self,
        action: BarMoveAction,
        snapshot: BarTask,
        pointer_x: f64,
    ) -> GanttResult<()> {
        if let Some(active) = &self.gesture {
            return Err(GanttError::GestureInProgress(active.snapshot.id().to_owned()));
        }
        self.hovered_id = None;
        self.selected_id = Some(snapshot.id().to_owned());
        self.cursor_x = Some(pointer_x);
        self.event = GanttEvent {
            action: action.into(),
            changed_task: Some(snapshot.clone()),
            original_selected_task: Some(snapshot.clone()),
        };
        self.gesture = Some(ActiveGesture {
            action,
            init_x1_delta: pointer_x - snapshot.x1,
            changed: snapshot.clone(),
            snapshot,
            is_changed: false,
        });
        Ok(())
    }

    /// Stores the latest candidate geometry of the active gesture.
    pub fn update_gesture(&mut self, pointer_x: f64, result: GestureResult) -> GanttResult<()> {
        let gesture = self.gesture.as_mut().ok_or(GanttError::NoActiveGesture)?;
        self.cursor_x = Some(pointer_x);
        gesture.is_changed = result.is_changed;
        gesture.changed = result.changed;
        self.event.changed_task = Some(gesture.changed.clone());
        Ok(())
    }

    /// Ends the active gesture and returns it; the state goes back to idle.
    pub fn finish_gesture(&mut self) -> GanttResult<ActiveGesture> {
        let gesture = self.gesture.take().ok_or(GanttError::NoActiveGesture)?;
        self.event = GanttEvent::default();
        Ok(gesture)
    }

    /// Marks a one-shot action (delete, re-parent) on the event.
    pub fn mark(&mut self, action: GanttAction) {
        if self.gesture.is_none() {
            self.event.action = action;
        }
    }

    /// Clears hover/select markers back to idle without touching selection.
    pub fn reset_action(&mut self) {
        if self.gesture.is_none() {
            self.event = GanttEvent::default();
        }
    }

    /// Drops references to a task that is no longer laid out.
    pub fn forget_task(&mut self, id: &str) {
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        if self.hovered_id.as_deref() == Some(id) {
            self.hovered_id = None;
        }
    }
}
