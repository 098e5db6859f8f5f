use serde::{Deserialize, Serialize};

use crate::core::{BarGeometryParams, BarPalette, Timestamp, ViewMode};
use crate::error::{GanttError, GanttResult};
use crate::interaction::BarMoveAction;

/// Which date gestures may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateChangeable {
    #[default]
    All,
    None,
    Only {
        start: bool,
        end: bool,
        moves: bool,
    },
}

impl DateChangeable {
    #[must_use]
    pub fn allows(self, action: BarMoveAction) -> bool {
        match (self, action) {
            (_, BarMoveAction::Progress) => true,
            (Self::All, _) => true,
            (Self::None, _) => false,
            (Self::Only { start, .. }, BarMoveAction::Start) => start,
            (Self::Only { end, .. }, BarMoveAction::End) => end,
            (Self::Only { moves, .. }, BarMoveAction::Move) => moves,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist chart setup; every field has a default
/// so partial JSON documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttEngineConfig {
    pub view_mode: ViewMode,
    /// Extra leading ticks before the first task.
    pub pre_steps_count: u32,
    /// Explicit seed range; replaces the task extent before padding.
    pub calendar_range: Option<(Timestamp, Timestamp)>,
    pub locale: String,
    pub rtl: bool,
    pub header_height: f64,
    pub column_width: f64,
    pub row_height: f64,
    /// Bar height as a percentage of the row height.
    pub bar_fill: f64,
    pub bar_corner_radius: f64,
    pub handle_width: f64,
    pub arrow_indent: f64,
    /// Lay out children as their own rows under expanded parents.
    pub show_sub_task: bool,
    /// Duration of one grid step; derived from the view mode when unset.
    pub time_step_ms: Option<i64>,
    pub date_changeable: DateChangeable,
    pub progress_changeable: bool,
    pub deletable: bool,
    pub readonly: bool,
    pub cascade_shift: bool,
    pub hierarchy_drag: bool,
    pub palette: BarPalette,
}

impl Default for GanttEngineConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Day,
            pre_steps_count: 1,
            calendar_range: None,
            locale: "en-GB".to_owned(),
            rtl: false,
            header_height: 50.0,
            column_width: 60.0,
            row_height: 50.0,
            bar_fill: 60.0,
            bar_corner_radius: 3.0,
            handle_width: 8.0,
            arrow_indent: 20.0,
            show_sub_task: false,
            time_step_ms: None,
            date_changeable: DateChangeable::All,
            progress_changeable: true,
            deletable: true,
            readonly: false,
            cascade_shift: true,
            hierarchy_drag: false,
            palette: BarPalette::default(),
        }
    }
}

impl GanttEngineConfig {
    #[must_use]
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    #[must_use]
    pub fn with_pre_steps_count(mut self, count: u32) -> Self {
        self.pre_steps_count = count;
        self
    }

    #[must_use]
    pub fn with_calendar_range(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.calendar_range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    #[must_use]
    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    #[must_use]
    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    #[must_use]
    pub fn with_bar_fill(mut self, percent: f64) -> Self {
        self.bar_fill = percent;
        self
    }

    #[must_use]
    pub fn with_bar_corner_radius(mut self, radius: f64) -> Self {
        self.bar_corner_radius = radius;
        self
    }

    #[must_use]
    pub fn with_handle_width(mut self, width: f64) -> Self {
        self.handle_width = width;
        self
    }

    #[must_use]
    pub fn with_arrow_indent(mut self, indent: f64) -> Self {
        self.arrow_indent = indent;
        self
    }

    #[must_use]
    pub fn with_show_sub_task(mut self, show: bool) -> Self {
        self.show_sub_task = show;
        self
    }

    #[must_use]
    pub fn with_time_step_ms(mut self, step: i64) -> Self {
        self.time_step_ms = Some(step);
        self
    }

    #[must_use]
    pub fn with_date_changeable(mut self, policy: DateChangeable) -> Self {
        self.date_changeable = policy;
        self
    }

    #[must_use]
    pub fn with_progress_changeable(mut self, changeable: bool) -> Self {
        self.progress_changeable = changeable;
        self
    }

    #[must_use]
    pub fn with_deletable(mut self, deletable: bool) -> Self {
        self.deletable = deletable;
        self
    }

    #[must_use]
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    #[must_use]
    pub fn with_cascade_shift(mut self, cascade: bool) -> Self {
        self.cascade_shift = cascade;
        self
    }

    #[must_use]
    pub fn with_hierarchy_drag(mut self, enabled: bool) -> Self {
        self.hierarchy_drag = enabled;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: BarPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn task_height(&self) -> f64 {
        self.row_height * self.bar_fill / 100.0
    }

    /// Effective gesture time step.
    #[must_use]
    pub fn time_step(&self) -> i64 {
        self.time_step_ms
            .unwrap_or_else(|| self.view_mode.nominal_step_ms())
    }

    #[must_use]
    pub fn geometry_params(&self) -> BarGeometryParams {
        BarGeometryParams {
            column_width: self.column_width,
            row_height: self.row_height,
            task_height: self.task_height(),
            bar_corner_radius: self.bar_corner_radius,
            handle_width: self.handle_width,
            rtl: self.rtl,
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GanttError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}
