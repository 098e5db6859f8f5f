//! Pointer position + active gesture -> candidate bar geometry.
//!
//! Every computation starts from the pre-gesture snapshot, so repeated
//! pointer moves never accumulate rounding drift.

use serde::{Deserialize, Serialize};

use crate::core::bar_geometry::{BarTask, TaskTypeInternal};
use crate::core::primitives::round_half_up;

/// Part of the bar grabbed by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarMoveAction {
    Move,
    /// Leading (left) handle.
    Start,
    /// Trailing (right) handle.
    End,
    Progress,
}

/// Pointer sample plus the snapping grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureInput {
    pub pointer_x: f64,
    /// Pixel width of one grid step (the column width).
    pub x_step: f64,
    /// Duration of one grid step.
    pub time_step_ms: i64,
    /// Pointer offset from the bar's `x1` at gesture start.
    pub init_x1_delta: f64,
    pub rtl: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureResult {
    pub is_changed: bool,
    pub changed: BarTask,
}

/// Translates a pointer sample into the candidate bar for `action`.
///
/// `is_changed` compares against the snapshot: a release with
/// `is_changed == false` must not commit anything.
#[must_use]
pub fn translate_gesture(
    action: BarMoveAction,
    snapshot: &BarTask,
    input: GestureInput,
) -> GestureResult {
    if input.x_step <= 0.0 || !input.x_step.is_finite() || !input.pointer_x.is_finite() {
        return unchanged(snapshot);
    }
    if snapshot.type_internal == TaskTypeInternal::Milestone {
        return match action {
            BarMoveAction::Move => move_bar(snapshot, input),
            _ => unchanged(snapshot),
        };
    }
    match action {
        BarMoveAction::Move => move_bar(snapshot, input),
        BarMoveAction::Start => drag_start_handle(snapshot, input),
        BarMoveAction::End => drag_end_handle(snapshot, input),
        BarMoveAction::Progress => drag_progress(snapshot, input),
    }
}

/// Progress percentage for a pointer at `x` over `[x1, x2]`.
#[must_use]
pub fn progress_by_x(x: f64, bar: &BarTask, rtl: bool) -> u8 {
    let width = bar.x2 - bar.x1;
    if rtl {
        if x >= bar.x2 {
            return 0;
        }
        if x <= bar.x1 {
            return 100;
        }
        percent((bar.x2 - x) * 100.0 / width)
    } else {
        if x >= bar.x2 {
            return 100;
        }
        if x <= bar.x1 {
            return 0;
        }
        percent((x - bar.x1) * 100.0 / width)
    }
}

fn percent(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 100.0) as u8
}

fn unchanged(snapshot: &BarTask) -> GestureResult {
    GestureResult {
        is_changed: false,
        changed: snapshot.clone(),
    }
}

/// Time offset for a pixel offset; x grows against time under RTL.
fn time_delta(delta_px: f64, input: GestureInput) -> i64 {
    let delta = (delta_px / input.x_step * input.time_step_ms as f64).round() as i64;
    if input.rtl { -delta } else { delta }
}

fn move_bar(snapshot: &BarTask, input: GestureInput) -> GestureResult {
    let target_x1 = input.pointer_x - input.init_x1_delta;
    let steps = round_half_up((target_x1 - snapshot.x1) / input.x_step);
    if steps == 0.0 {
        return unchanged(snapshot);
    }

    let delta_px = steps * input.x_step;
    let delta_ms = steps as i64 * input.time_step_ms;
    let delta_ms = if input.rtl { -delta_ms } else { delta_ms };

    let mut changed = snapshot.clone();
    changed.x1 = snapshot.x1 + delta_px;
    changed.x2 = snapshot.x2 + delta_px;
    changed.start = snapshot.start + delta_ms;
    changed.end = if snapshot.type_internal == TaskTypeInternal::Milestone {
        changed.start
    } else {
        snapshot.end + delta_ms
    };
    if snapshot.type_internal != TaskTypeInternal::Milestone {
        changed.refresh_progress_rect(input.rtl);
    }
    GestureResult {
        is_changed: true,
        changed,
    }
}

fn drag_start_handle(snapshot: &BarTask, input: GestureInput) -> GestureResult {
    let limit = snapshot.x2 - snapshot.handle_width * 2.0;
    let steps = round_half_up((input.pointer_x - snapshot.x1) / input.x_step);
    let new_x1 = (snapshot.x1 + steps * input.x_step).min(limit);
    if new_x1 == snapshot.x1 {
        return unchanged(snapshot);
    }

    let mut changed = snapshot.clone();
    changed.x1 = new_x1;
    let delta_ms = time_delta(new_x1 - snapshot.x1, input);
    if input.rtl {
        changed.end = (snapshot.end + delta_ms).max(snapshot.start);
    } else {
        changed.start = (snapshot.start + delta_ms).min(snapshot.end);
    }
    changed.refresh_progress_rect(input.rtl);
    GestureResult {
        is_changed: true,
        changed,
    }
}

fn drag_end_handle(snapshot: &BarTask, input: GestureInput) -> GestureResult {
    let limit = snapshot.x1 + snapshot.handle_width * 2.0;
    let steps = round_half_up((input.pointer_x - snapshot.x2) / input.x_step);
    let new_x2 = (snapshot.x2 + steps * input.x_step).max(limit);
    if new_x2 == snapshot.x2 {
        return unchanged(snapshot);
    }

    let mut changed = snapshot.clone();
    changed.x2 = new_x2;
    let delta_ms = time_delta(new_x2 - snapshot.x2, input);
    if input.rtl {
        changed.start = (snapshot.start + delta_ms).min(snapshot.end);
    } else {
        changed.end = (snapshot.end + delta_ms).max(snapshot.start);
    }
    changed.refresh_progress_rect(input.rtl);
    GestureResult {
        is_changed: true,
        changed,
    }
}

fn drag_progress(snapshot: &BarTask, input: GestureInput) -> GestureResult {
    let progress = progress_by_x(input.pointer_x, snapshot, input.rtl);
    if progress == snapshot.progress {
        return unchanged(snapshot);
    }
    let mut changed = snapshot.clone();
    changed.progress = progress;
    changed.refresh_progress_rect(input.rtl);
    GestureResult {
        is_changed: true,
        changed,
    }
}
