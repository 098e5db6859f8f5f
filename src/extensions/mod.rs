//! Extension hooks for hosts that observe the engine.

pub mod plugins;

pub use plugins::{GanttPlugin, PluginContext, PluginEvent};
