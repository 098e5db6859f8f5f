mod arrow;
mod frame;
mod null_renderer;
mod primitives;

pub use arrow::{ArrowLayout, route_arrow};
pub use frame::{
    ArrowShape, BarShape, CalendarHeader, GanttFrame, GridColumn, HeaderCell, RowBand,
};
pub use null_renderer::NullRenderer;
pub use primitives::Point;

use crate::error::GanttResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `GanttFrame` so drawing code stays
/// isolated from task data and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &GanttFrame) -> GanttResult<()>;
}
