use serde::{Deserialize, Serialize};

use crate::core::{Timestamp, ViewMode};
use crate::interaction::{BarMoveAction, GanttAction};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub view_mode: ViewMode,
    pub date_range: Option<(Timestamp, Timestamp)>,
    pub tick_count: usize,
    pub row_count: usize,
    pub svg_width: f64,
    pub action: GanttAction,
    pub selected_id: Option<String>,
    pub hovered_id: Option<String>,
    pub pending_commits: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    LayoutUpdated { rows: usize, ticks: usize },
    HoverChanged { task_id: Option<String> },
    SelectionChanged { task_id: Option<String> },
    ExpanderToggled { task_id: String, collapsed: bool },
    GestureStarted { task_id: String, action: BarMoveAction },
    GestureChanged { task_id: String, action: BarMoveAction },
    GestureCancelled { task_id: String },
    CommitRequested { commit_id: u64, task_id: String },
    CommitAccepted { commit_id: u64, task_id: String },
    CommitRolledBack { commit_id: u64, task_id: String, reason: String },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating engine
/// internals directly.
pub trait GanttPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: &PluginContext);
}
