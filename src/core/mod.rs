pub mod bar_geometry;
pub mod calendar_math;
pub mod coordinate;
pub mod flatten;
pub mod hierarchy;
pub mod primitives;
pub mod task_tree;
pub mod time_axis;
pub mod types;

pub use bar_geometry::{
    BarColors, BarGeometryParams, BarPalette, BarSegment, BarTask, TaskTypeInternal,
    build_bar_tasks,
};
pub use coordinate::{instant_from_x, instant_from_x_rtl, x_from_instant, x_from_instant_rtl};
pub use flatten::{TaskRow, flatten_tasks};
pub use hierarchy::{ReparentRejection, TreeEdit};
pub use time_axis::TimeAxis;
pub use types::{Task, TaskRef, TaskStyles, TaskType, Timestamp, ViewMode, task_list};
