use tracing::trace;

use crate::extensions::{PluginContext, PluginEvent};
use crate::render::Renderer;

use super::GanttEngine;

impl<R: Renderer> GanttEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            view_mode: self.config.view_mode,
            date_range: self.layout.axis().map(|axis| axis.date_range()),
            tick_count: self.layout.ticks().len(),
            row_count: self.layout.rows().len(),
            svg_width: self.svg_width(),
            action: self.interaction.action(),
            selected_id: self.interaction.selected_id().map(str::to_owned),
            hovered_id: self.interaction.hovered_id().map(str::to_owned),
            pending_commits: self.commits.len(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(event = ?event, plugins = self.plugins.len(), "dispatching plugin event");
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }
}
