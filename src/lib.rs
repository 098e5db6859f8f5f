//! gantt-rs: headless Gantt chart engine.
//!
//! The crate turns a task tree into a time axis, positioned bars and
//! dependency arrows, translates pointer gestures into date/progress edits,
//! and runs those edits through an optimistic commit protocol with the host.
//! Drawing is delegated to a [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig};
pub use error::{GanttError, GanttResult};
