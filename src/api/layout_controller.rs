use tracing::debug;

use crate::core::time_axis::task_extent;
use crate::core::{
    BarGeometryParams, BarPalette, BarTask, TaskRef, TaskRow, TimeAxis, Timestamp, ViewMode,
    build_bar_tasks, flatten_tasks,
};
use crate::error::GanttResult;
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::{GanttEngine, GanttEngineConfig};

/// Everything the layout depends on; a matching key means no recompute.
#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    tasks_version: u64,
    view_mode: ViewMode,
    pre_steps_count: u32,
    calendar_range: Option<(Timestamp, Timestamp)>,
    show_sub_task: bool,
    geometry: BarGeometryParams,
    palette: BarPalette,
}

impl LayoutKey {
    fn new(config: &GanttEngineConfig, tasks_version: u64) -> Self {
        Self {
            tasks_version,
            view_mode: config.view_mode,
            pre_steps_count: config.pre_steps_count,
            calendar_range: config.calendar_range,
            show_sub_task: config.show_sub_task,
            geometry: config.geometry_params(),
            palette: config.palette.clone(),
        }
    }
}

/// Memoised steady-state render model.
#[derive(Debug, Default)]
pub(super) struct LayoutState {
    key: Option<LayoutKey>,
    axis: Option<TimeAxis>,
    rows: Vec<TaskRow>,
    bars: Vec<BarTask>,
    generation: u64,
}

impl LayoutState {
    pub(super) fn ticks(&self) -> &[Timestamp] {
        self.axis.as_ref().map(TimeAxis::ticks).unwrap_or_default()
    }

    pub(super) fn axis(&self) -> Option<&TimeAxis> {
        self.axis.as_ref()
    }

    pub(super) fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    pub(super) fn bars(&self) -> &[BarTask] {
        &self.bars
    }

    pub(super) fn generation(&self) -> u64 {
        self.generation
    }
}

impl<R: Renderer> GanttEngine<R> {
    /// Recomputes ticks, rows and bars when their inputs changed.
    ///
    /// Returns `true` when a new layout was produced.
    pub(super) fn refresh_layout(&mut self) -> GanttResult<bool> {
        let key = LayoutKey::new(&self.config, self.tasks_version);
        if self.layout.key.as_ref() == Some(&key) {
            return Ok(false);
        }

        let seed = self
            .config
            .calendar_range
            .or_else(|| task_extent(&self.tasks));
        let axis = match seed {
            Some(range) => Some(TimeAxis::from_tasks(
                &self.tasks,
                self.config.view_mode,
                self.config.pre_steps_count,
                Some(range),
            )?),
            None => None,
        };
        let rows = match &axis {
            Some(_) => flatten_tasks(
                &self.tasks,
                self.config.show_sub_task,
                self.config.calendar_range,
            ),
            None => Vec::new(),
        };
        let ticks = axis.as_ref().map(TimeAxis::ticks).unwrap_or_default();
        let bars = build_bar_tasks(&rows, ticks, key.geometry, &key.palette);

        debug!(
            rows = rows.len(),
            ticks = ticks.len(),
            bars = bars.len(),
            view_mode = ?self.config.view_mode,
            "layout recomputed"
        );

        let event = PluginEvent::LayoutUpdated {
            rows: rows.len(),
            ticks: ticks.len(),
        };
        self.layout = LayoutState {
            key: Some(key),
            axis,
            rows,
            bars,
            generation: self.layout.generation.wrapping_add(1),
        };
        self.emit_plugin_event(event);
        Ok(true)
    }

    /// Swaps in a new displayed tree and invalidates the layout.
    pub(super) fn replace_displayed_tasks(&mut self, tasks: Vec<TaskRef>) {
        self.tasks = tasks;
        self.tasks_version = self.tasks_version.wrapping_add(1);
    }
}
