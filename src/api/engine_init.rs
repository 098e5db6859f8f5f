use tracing::debug;

use crate::core::task_tree::{count_tasks, validate_tree};
use crate::core::{TaskRef, ViewMode};
use crate::error::GanttResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::commit_controller::CommitLedger;
use super::label_cache::CalendarLabelCache;
use super::layout_controller::LayoutState;
use super::validation::validate_config;
use super::{GanttEngine, GanttEngineConfig};

impl<R: Renderer> GanttEngine<R> {
    /// Creates an engine with an empty task list.
    pub fn new(renderer: R, config: GanttEngineConfig) -> GanttResult<Self> {
        validate_config(&config)?;
        let mut engine = Self {
            renderer,
            config,
            base_tasks: Vec::new(),
            tasks: Vec::new(),
            tasks_version: 0,
            layout: LayoutState::default(),
            interaction: InteractionState::default(),
            commits: CommitLedger::default(),
            label_cache: CalendarLabelCache::default(),
            plugins: Vec::new(),
        };
        engine.refresh_layout()?;
        Ok(engine)
    }

    /// Creates an engine and loads `tasks`.
    pub fn with_tasks(
        renderer: R,
        config: GanttEngineConfig,
        tasks: Vec<TaskRef>,
    ) -> GanttResult<Self> {
        let mut engine = Self::new(renderer, config)?;
        engine.set_tasks(tasks)?;
        Ok(engine)
    }

    /// Replaces the configuration; the layout is rebuilt only when a
    /// layout-relevant field changed. An active gesture is cancelled.
    pub fn set_config(&mut self, config: GanttEngineConfig) -> GanttResult<()> {
        validate_config(&config)?;
        self.cancel_gesture();
        self.config = config;
        self.refresh_layout()?;
        Ok(())
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) -> GanttResult<()> {
        let config = self.config.clone().with_view_mode(view_mode);
        self.set_config(config)
    }

    /// Loads a new confirmed task tree. Pending commits are replayed on top.
    pub fn set_tasks(&mut self, tasks: Vec<TaskRef>) -> GanttResult<()> {
        validate_tree(&tasks)?;
        self.cancel_gesture();
        debug!(tasks = count_tasks(&tasks), "task tree loaded");
        self.base_tasks = tasks;
        self.rebuild_displayed_tasks();
        self.refresh_layout()?;
        self.forget_missing_tasks();
        Ok(())
    }

    /// Clears hover/selection that point at rows no longer laid out.
    pub(super) fn forget_missing_tasks(&mut self) {
        let stale: Vec<String> = [self.interaction.selected_id(), self.interaction.hovered_id()]
            .into_iter()
            .flatten()
            .filter(|id| self.bar(id).is_none())
            .map(str::to_owned)
            .collect();
        for id in stale {
            self.interaction.forget_task(&id);
        }
    }
}
