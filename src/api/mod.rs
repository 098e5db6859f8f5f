//! Host-facing engine facade.
//!
//! `GanttEngine` is split into per-concern `impl` blocks: construction,
//! layout memoisation, gestures, commits, selection/keyboard, calendar
//! header, frame assembly and plugins.

mod calendar_labels;
mod commit_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod frame_builder;
mod gesture_controller;
mod handler;
mod interaction_controller;
mod label_cache;
mod layout_controller;
mod plugin_dispatch;
mod plugin_registry;
mod validation;

pub use engine::GanttEngine;
pub use engine_config::{DateChangeable, GanttEngineConfig};
pub use handler::{
    AcceptAll, CommitKind, CommitOutcome, CommitResolution, GanttHandler, GanttKey,
    PendingCommit, Rejection, Release, ReparentOutcome, SelectionChange,
};
pub use label_cache::CalendarLabelCacheStats;
