use crate::core::task_tree::find_task;
use crate::core::{BarTask, TaskRef, TaskRow, Timestamp};
use crate::interaction::{GanttEvent, InteractionState};
use crate::render::Renderer;

use super::{GanttEngine, GanttEngineConfig};

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn config(&self) -> &GanttEngineConfig {
        &self.config
    }

    /// Displayed tree, including every pending optimistic edit.
    #[must_use]
    pub fn tasks(&self) -> &[TaskRef] {
        &self.tasks
    }

    /// Tree confirmed by the host, without pending edits.
    #[must_use]
    pub fn committed_tasks(&self) -> &[TaskRef] {
        &self.base_tasks
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&TaskRef> {
        find_task(&self.tasks, id)
    }

    #[must_use]
    pub fn ticks(&self) -> &[Timestamp] {
        self.layout.ticks()
    }

    /// Padded date range; `None` while there is nothing to lay out.
    #[must_use]
    pub fn date_range(&self) -> Option<(Timestamp, Timestamp)> {
        self.layout.axis().map(|axis| axis.date_range())
    }

    #[must_use]
    pub fn rows(&self) -> &[TaskRow] {
        self.layout.rows()
    }

    #[must_use]
    pub fn bars(&self) -> &[BarTask] {
        self.layout.bars()
    }

    #[must_use]
    pub fn bar(&self, id: &str) -> Option<&BarTask> {
        self.layout.bars().iter().find(|bar| bar.id() == id)
    }

    /// Top-most bar under the pointer, in render order.
    #[must_use]
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&BarTask> {
        self.layout.bars().iter().rev().find(|bar| bar.contains(x, y))
    }

    /// Chart width: one column per tick.
    #[must_use]
    pub fn svg_width(&self) -> f64 {
        self.layout
            .axis()
            .map_or(0.0, |axis| axis.width(self.config.column_width))
    }

    /// Height of the task area below the calendar header.
    #[must_use]
    pub fn grid_height(&self) -> f64 {
        self.layout.rows().len() as f64 * self.config.row_height
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn event(&self) -> &GanttEvent {
        self.interaction.event()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.interaction.selected_id()
    }

    #[must_use]
    pub fn hovered_id(&self) -> Option<&str> {
        self.interaction.hovered_id()
    }

    /// Bumped every time the layout is recomputed.
    #[must_use]
    pub fn layout_generation(&self) -> u64 {
        self.layout.generation()
    }
}
