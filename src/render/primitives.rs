use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Point in chart pixel space (origin at the top-left of the bar area).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn validate(self) -> GanttResult<()> {
        ensure_finite("point x", self.x)?;
        ensure_finite("point y", self.y)
    }
}

pub(crate) fn ensure_finite(name: &str, value: f64) -> GanttResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GanttError::InvalidData(format!("{name} must be finite")))
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> GanttResult<()> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(GanttError::InvalidData(format!("{name} must be >= 0")));
    }
    Ok(())
}
