use serde::{Deserialize, Serialize};

use crate::core::{BarSegment, TaskTypeInternal, Timestamp};
use crate::error::{GanttError, GanttResult};
use crate::render::primitives::{Point, ensure_finite, ensure_non_negative};

/// One labelled header cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub label: String,
    /// First tick index covered by the cell.
    pub tick_index: usize,
    pub x: f64,
    pub width: f64,
    pub text_x: f64,
    pub text_y: f64,
}

/// Header model: grouped top cells and one bottom cell per tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalendarHeader {
    pub height: f64,
    pub top: Vec<HeaderCell>,
    pub bottom: Vec<HeaderCell>,
}

/// Vertical grid column owned by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    pub tick: Timestamp,
    pub x: f64,
    pub width: f64,
}

/// Horizontal band of one render row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowBand {
    pub index: usize,
    pub task_id: String,
    pub y: f64,
    pub height: f64,
}

/// Draw data of one bar (or milestone diamond).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarShape {
    pub task_id: String,
    pub label: String,
    pub type_internal: TaskTypeInternal,
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub handle_width: f64,
    pub progress_x: f64,
    pub progress_width: f64,
    pub background_color: String,
    pub progress_color: String,
    pub selected: bool,
    /// Handles are drawn only for editable bars.
    pub show_handles: bool,
    pub segments: Vec<BarSegment>,
}

/// Dependency connector from `from_id` to `to_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowShape {
    pub from_id: String,
    pub to_id: String,
    /// Orthogonal polyline from the source edge to the target edge.
    pub points: Vec<Point>,
    pub head: [Point; 3],
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GanttFrame {
    pub width: f64,
    pub height: f64,
    pub rtl: bool,
    pub header: CalendarHeader,
    pub columns: Vec<GridColumn>,
    pub rows: Vec<RowBand>,
    pub bars: Vec<BarShape>,
    pub arrows: Vec<ArrowShape>,
}

impl GanttFrame {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.columns.is_empty()
    }

    pub fn validate(&self) -> GanttResult<()> {
        ensure_non_negative("frame width", self.width)?;
        ensure_non_negative("frame height", self.height)?;

        for column in &self.columns {
            ensure_finite("column x", column.x)?;
            ensure_non_negative("column width", column.width)?;
        }
        for cell in self.header.top.iter().chain(&self.header.bottom) {
            ensure_finite("header cell x", cell.x)?;
            ensure_non_negative("header cell width", cell.width)?;
        }
        for bar in &self.bars {
            ensure_finite("bar x1", bar.x1)?;
            ensure_finite("bar x2", bar.x2)?;
            ensure_finite("bar y", bar.y)?;
            ensure_non_negative("bar height", bar.height)?;
            ensure_non_negative("progress width", bar.progress_width)?;
            if bar.x2 < bar.x1 {
                return Err(GanttError::InvalidData(format!(
                    "bar `{}` has x2 < x1",
                    bar.task_id
                )));
            }
            for segment in &bar.segments {
                ensure_finite("segment x1", segment.x1)?;
                ensure_finite("segment x2", segment.x2)?;
            }
        }
        for arrow in &self.arrows {
            for point in arrow.points.iter().chain(&arrow.head) {
                point.validate()?;
            }
        }
        Ok(())
    }
}
