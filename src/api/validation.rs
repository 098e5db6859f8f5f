use crate::error::{GanttError, GanttResult};

use super::GanttEngineConfig;

/// Rejects configurations the layout pipeline cannot honour.
pub(super) fn validate_config(config: &GanttEngineConfig) -> GanttResult<()> {
    for (name, value) in [
        ("header_height", config.header_height),
        ("column_width", config.column_width),
        ("row_height", config.row_height),
        ("handle_width", config.handle_width),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "`{name}` must be finite and > 0"
            )));
        }
    }

    for (name, value) in [
        ("bar_corner_radius", config.bar_corner_radius),
        ("arrow_indent", config.arrow_indent),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "`{name}` must be finite and >= 0"
            )));
        }
    }

    if !config.bar_fill.is_finite() || config.bar_fill <= 0.0 || config.bar_fill > 100.0 {
        return Err(GanttError::InvalidConfig(
            "`bar_fill` must be in (0, 100]".to_owned(),
        ));
    }

    if let Some((start, end)) = config.calendar_range {
        if end < start {
            return Err(GanttError::InvalidConfig(
                "calendar range end must not precede its start".to_owned(),
            ));
        }
    }

    if let Some(step) = config.time_step_ms {
        if step <= 0 {
            return Err(GanttError::InvalidConfig(
                "`time_step_ms` must be > 0".to_owned(),
            ));
        }
    }

    Ok(())
}
