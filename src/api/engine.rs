use crate::core::TaskRef;
use crate::error::GanttResult;
use crate::extensions::{GanttPlugin, PluginEvent};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::GanttEngineConfig;
use super::commit_controller::CommitLedger;
use super::label_cache::CalendarLabelCache;
use super::layout_controller::LayoutState;

/// Main orchestration facade consumed by host applications.
///
/// `GanttEngine` owns the task tree, the memoised layout (ticks, rows,
/// bars), the interaction state machine and the optimistic commit ledger,
/// and hands finished frames to the renderer.
pub struct GanttEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: GanttEngineConfig,
    /// Tree confirmed by the host.
    pub(super) base_tasks: Vec<TaskRef>,
    /// `base_tasks` with every pending commit replayed on top.
    pub(super) tasks: Vec<TaskRef>,
    pub(super) tasks_version: u64,
    pub(super) layout: LayoutState,
    pub(super) interaction: InteractionState,
    pub(super) commits: CommitLedger,
    pub(super) label_cache: CalendarLabelCache,
    pub(super) plugins: Vec<Box<dyn GanttPlugin>>,
}

impl<R: Renderer> GanttEngine<R> {
    pub fn render(&mut self) -> GanttResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
