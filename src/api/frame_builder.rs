use crate::core::{BarTask, TaskTypeInternal};
use crate::interaction::BarMoveAction;
use crate::render::{
    ArrowLayout, ArrowShape, BarShape, GanttFrame, GridColumn, Renderer, RowBand, route_arrow,
};

use super::GanttEngine;

impl<R: Renderer> GanttEngine<R> {
    /// Materializes the current layout into a backend-agnostic frame.
    ///
    /// Bar coordinates are relative to the task area; the header sits above
    /// it and `height` covers the task area only. The bar under an active
    /// gesture is drawn with its candidate geometry.
    #[must_use]
    pub fn build_frame(&mut self) -> GanttFrame {
        let header = self.calendar_header();
        let bars = self.display_bars();
        let cw = self.config.column_width;
        let rh = self.config.row_height;
        let ticks = self.layout.ticks();
        let count = ticks.len();

        let columns = ticks
            .iter()
            .enumerate()
            .map(|(index, &tick)| {
                let slot = if self.config.rtl { count - 1 - index } else { index };
                GridColumn {
                    tick,
                    x: slot as f64 * cw,
                    width: cw,
                }
            })
            .collect();
        let rows = self
            .layout
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| RowBand {
                index,
                task_id: row.id().to_owned(),
                y: index as f64 * rh,
                height: rh,
            })
            .collect();

        let arrow_layout = ArrowLayout {
            row_height: rh,
            arrow_indent: self.config.arrow_indent,
            rtl: self.config.rtl,
        };
        let arrows: Vec<ArrowShape> = bars
            .iter()
            .flat_map(|from| {
                from.bar_children
                    .iter()
                    .filter_map(|&child| bars.get(child))
                    .map(move |to| route_arrow(from, to, arrow_layout))
            })
            .collect();
        let shapes = bars.iter().map(|bar| self.bar_shape(bar)).collect();

        GanttFrame {
            width: self.svg_width(),
            height: self.grid_height(),
            rtl: self.config.rtl,
            header,
            columns,
            rows,
            bars: shapes,
            arrows,
        }
    }

    fn display_bars(&self) -> Vec<BarTask> {
        let mut bars = self.layout.bars().to_vec();
        if let Some(gesture) = self.interaction.active_gesture() {
            let id = gesture.snapshot.id();
            if let Some(slot) = bars.iter_mut().find(|bar| bar.id() == id) {
                let bar_children = std::mem::take(&mut slot.bar_children);
                let index = slot.index;
                *slot = gesture.changed.clone();
                slot.bar_children = bar_children;
                slot.index = index;
            }
        }
        bars
    }

    fn bar_shape(&self, bar: &BarTask) -> BarShape {
        let selected = self.interaction.selected_id() == Some(bar.id());
        let (background_color, progress_color) = if selected {
            (
                bar.styles.background_selected.clone(),
                bar.styles.progress_selected.clone(),
            )
        } else {
            (bar.styles.background.clone(), bar.styles.progress.clone())
        };
        let policy = self.config.date_changeable;
        let editable = !self.config.readonly && !bar.task.is_disabled;
        let show_handles = editable
            && matches!(
                bar.type_internal,
                TaskTypeInternal::Task | TaskTypeInternal::SmallTask
            )
            && (policy.allows(BarMoveAction::Start) || policy.allows(BarMoveAction::End));

        BarShape {
            task_id: bar.id().to_owned(),
            label: bar.name().to_owned(),
            type_internal: bar.type_internal,
            x1: bar.x1,
            x2: bar.x2,
            y: bar.y,
            height: bar.height,
            corner_radius: bar.bar_corner_radius,
            handle_width: bar.handle_width,
            progress_x: bar.progress_x,
            progress_width: bar.progress_width,
            background_color,
            progress_color,
            selected,
            show_handles,
            segments: bar.segments.clone(),
        }
    }
}
