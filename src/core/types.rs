use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Instant in epoch milliseconds (UTC).
pub type Timestamp = i64;

/// Shared handle to an immutable task node.
///
/// Edits rebuild only the nodes along the edited path; untouched subtrees are
/// shared between the old and the new tree.
pub type TaskRef = Arc<Task>;

pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Task,
    Milestone,
    Project,
}

/// Calendar granularity of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewMode {
    Hour,
    HalfHour,
    QuarterDay,
    HalfDay,
    #[default]
    Day,
    /// ISO-8601 week.
    Week,
    Month,
    QuarterYear,
    Year,
}

impl ViewMode {
    pub const ALL: [ViewMode; 9] = [
        ViewMode::Hour,
        ViewMode::HalfHour,
        ViewMode::QuarterDay,
        ViewMode::HalfDay,
        ViewMode::Day,
        ViewMode::Week,
        ViewMode::Month,
        ViewMode::QuarterYear,
        ViewMode::Year,
    ];

    /// Nominal duration of one grid column, used as the default gesture time step.
    ///
    /// Calendar units (month, quarter, year) use a fixed approximation.
    #[must_use]
    pub fn nominal_step_ms(self) -> i64 {
        match self {
            Self::Hour => MILLIS_PER_HOUR,
            Self::HalfHour => 30 * MILLIS_PER_MINUTE,
            Self::QuarterDay => 6 * MILLIS_PER_HOUR,
            Self::HalfDay => 12 * MILLIS_PER_HOUR,
            Self::Day => MILLIS_PER_DAY,
            Self::Week => 7 * MILLIS_PER_DAY,
            Self::Month => 30 * MILLIS_PER_DAY,
            Self::QuarterYear => 91 * MILLIS_PER_DAY,
            Self::Year => 365 * MILLIS_PER_DAY,
        }
    }
}

/// Optional per-task colour overrides, merged over type-based defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_selected_color: Option<String>,
}

/// Persistent domain entity of the chart.
///
/// `start`/`end` are optional: a row without them takes the configured
/// calendar range or is dropped during flattening. Caller-defined fields
/// live in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TaskType,
    #[serde(default)]
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub end: Option<Timestamp>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub hide_children: Option<bool>,
    #[serde(default)]
    pub children: Vec<TaskRef>,
    #[serde(default)]
    pub styles: TaskStyles,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl Task {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: TaskType,
        start: Timestamp,
        end: Timestamp,
    ) -> Self {
        let end = if kind == TaskType::Milestone {
            start
        } else {
            end
        };
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            start: Some(start),
            end: Some(end),
            progress: 0,
            dependencies: Vec::new(),
            hide_children: None,
            children: Vec::new(),
            styles: TaskStyles::default(),
            is_disabled: false,
            metadata: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn task(id: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, TaskType::Task, start, end)
    }

    #[must_use]
    pub fn project(id: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, TaskType::Project, start, end)
    }

    #[must_use]
    pub fn milestone(id: impl Into<String>, at: Timestamp) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, TaskType::Milestone, at, at)
    }

    /// Container row without its own schedule.
    #[must_use]
    pub fn unscheduled(id: impl Into<String>, kind: TaskType) -> Self {
        let id = id.into();
        Self {
            start: None,
            end: None,
            ..Self::new(id.clone(), id, kind, 0, 0)
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets progress, clamped to `0..=100`.
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Task>) -> Self {
        if self.hide_children.is_none() && !children.is_empty() {
            self.hide_children = Some(false);
        }
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    #[must_use]
    pub fn with_hide_children(mut self, hide: bool) -> Self {
        self.hide_children = Some(hide);
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: TaskStyles) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> TaskRef {
        Arc::new(self)
    }

    /// Returns `(start, end)` when both bounds are present.
    #[must_use]
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True for a scheduled node whose `end` precedes its `start`.
    /// Such rows are dropped by the flattener.
    #[must_use]
    pub fn has_inverted_span(&self) -> bool {
        self.span().is_some_and(|(start, end)| end < start)
    }
}

/// Convenience for building a root task list from owned tasks.
#[must_use]
pub fn task_list(tasks: Vec<Task>) -> Vec<TaskRef> {
    tasks.into_iter().map(Arc::new).collect()
}
