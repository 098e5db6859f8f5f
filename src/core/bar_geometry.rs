use std::f64::consts::SQRT_2;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::coordinate::{x_from_instant, x_from_instant_rtl};
use crate::core::flatten::TaskRow;
use crate::core::types::{TaskRef, TaskStyles, TaskType, Timestamp};

const SEGMENT_COLORS: [&str; 3] = ["#F77879", "#99CBFA", "#D5DEE5"];

/// Rendering variant derived from the task type and its rendered width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskTypeInternal {
    Task,
    /// A task bar promoted to the two-handle minimum width.
    SmallTask,
    Milestone,
    Project,
}

/// Resolved colour set of one bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarColors {
    pub background: String,
    pub background_selected: String,
    pub progress: String,
    pub progress_selected: String,
}

impl BarColors {
    fn new(background: &str, background_selected: &str, progress: &str, progress_selected: &str) -> Self {
        Self {
            background: background.to_owned(),
            background_selected: background_selected.to_owned(),
            progress: progress.to_owned(),
            progress_selected: progress_selected.to_owned(),
        }
    }

    /// Applies per-task overrides on top of these defaults.
    #[must_use]
    pub fn merged_with(&self, styles: &TaskStyles) -> Self {
        Self {
            background: styles
                .background_color
                .clone()
                .unwrap_or_else(|| self.background.clone()),
            background_selected: styles
                .background_selected_color
                .clone()
                .unwrap_or_else(|| self.background_selected.clone()),
            progress: styles
                .progress_color
                .clone()
                .unwrap_or_else(|| self.progress.clone()),
            progress_selected: styles
                .progress_selected_color
                .clone()
                .unwrap_or_else(|| self.progress_selected.clone()),
        }
    }
}

/// Type-based default colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarPalette {
    pub task: BarColors,
    pub project: BarColors,
    pub milestone: BarColors,
}

impl Default for BarPalette {
    fn default() -> Self {
        Self {
            task: BarColors::new("#b8c2cc", "#aeb8c2", "#a3a3ff", "#8282f5"),
            project: BarColors::new("#fac465", "#f7bb53", "#7db59a", "#59a985"),
            milestone: BarColors::new("#f1c453", "#f29e4c", "", ""),
        }
    }
}

impl BarPalette {
    #[must_use]
    pub fn for_type(&self, kind: TaskType) -> &BarColors {
        match kind {
            TaskType::Task => &self.task,
            TaskType::Project => &self.project,
            TaskType::Milestone => &self.milestone,
        }
    }
}

/// Pixel sizing inputs of the geometry builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometryParams {
    pub column_width: f64,
    pub row_height: f64,
    pub task_height: f64,
    pub bar_corner_radius: f64,
    pub handle_width: f64,
    pub rtl: bool,
}

/// Child span drawn inside a parent bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub child_id: String,
    pub x1: f64,
    pub x2: f64,
    pub progress_x: f64,
    pub progress_width: f64,
    pub color: String,
}

/// Per-render projection of a task plus its derived geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTask {
    pub task: TaskRef,
    pub index: usize,
    pub depth: usize,
    pub parent_id: Option<String>,
    pub start: Timestamp,
    pub end: Timestamp,
    pub progress: u8,
    pub type_internal: TaskTypeInternal,
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub height: f64,
    pub progress_x: f64,
    pub progress_width: f64,
    pub bar_corner_radius: f64,
    pub handle_width: f64,
    pub hide_children: Option<bool>,
    pub has_overlapping_children: bool,
    pub styles: BarColors,
    pub segments: Vec<BarSegment>,
    /// Indices of bars that depend on this one (arrow targets).
    pub bar_children: SmallVec<[usize; 4]>,
}

impl BarTask {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.task.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.task.name
    }

    #[must_use]
    pub fn kind(&self) -> TaskType {
        self.task.kind
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y && y <= self.y + self.height
    }

    /// Recomputes the progress fill from the current bounds and progress.
    pub fn refresh_progress_rect(&mut self, rtl: bool) {
        let (width, x) = progress_with_by_params(self.x1, self.x2, self.progress, rtl);
        self.progress_width = width;
        self.progress_x = x;
    }
}

/// Converts flattened rows into positioned bars and links dependency arrows.
#[must_use]
pub fn build_bar_tasks(
    rows: &[TaskRow],
    ticks: &[Timestamp],
    params: BarGeometryParams,
    palette: &BarPalette,
) -> Vec<BarTask> {
    #[cfg(feature = "parallel-layout")]
    let mut bars: Vec<BarTask> = {
        use rayon::prelude::*;
        rows.par_iter()
            .enumerate()
            .map(|(index, row)| build_bar(row, index, ticks, params, palette))
            .collect()
    };
    #[cfg(not(feature = "parallel-layout"))]
    let mut bars: Vec<BarTask> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| build_bar(row, index, ticks, params, palette))
        .collect();

    link_dependencies(&mut bars);
    bars
}

/// Fills every bar's `bar_children` with the indices of its dependents.
///
/// Dependency ids that resolve to no rendered bar are skipped.
pub fn link_dependencies(bars: &mut [BarTask]) {
    let index_by_id: IndexMap<String, usize> = bars
        .iter()
        .map(|bar| (bar.id().to_owned(), bar.index))
        .collect();

    for dependent in 0..bars.len() {
        let dependencies = bars[dependent].task.dependencies.clone();
        for dependency in &dependencies {
            match index_by_id.get(dependency.as_str()) {
                Some(&source) => bars[source].bar_children.push(dependent),
                None => trace!(
                    task_id = %bars[dependent].id(),
                    dependency = %dependency,
                    "dependency does not resolve to a rendered bar"
                ),
            }
        }
    }
}

/// Row top of a bar vertically centered in its row band.
#[must_use]
pub fn task_y(index: usize, row_height: f64, task_height: f64) -> f64 {
    index as f64 * row_height + (row_height - task_height) / 2.0
}

/// Returns `(progress_width, progress_x)` for a bar spanning `[x1, x2]`.
///
/// The fill grows from the reading-direction start of the bar.
#[must_use]
pub fn progress_with_by_params(x1: f64, x2: f64, progress: u8, rtl: bool) -> (f64, f64) {
    let progress_width = (x2 - x1) * f64::from(progress) * 0.01;
    let progress_x = if rtl { x2 - progress_width } else { x1 };
    (progress_width, progress_x)
}

fn build_bar(
    row: &TaskRow,
    index: usize,
    ticks: &[Timestamp],
    params: BarGeometryParams,
    palette: &BarPalette,
) -> BarTask {
    let task = &row.task;
    let styles = palette.for_type(task.kind).merged_with(&task.styles);
    let y = task_y(index, params.row_height, params.task_height);

    if task.kind == TaskType::Milestone {
        let x = if params.rtl {
            x_from_instant_rtl(row.start, ticks, params.column_width)
        } else {
            x_from_instant(row.start, ticks, params.column_width)
        };
        return BarTask {
            task: task.clone(),
            index,
            depth: row.depth,
            parent_id: row.parent_id.clone(),
            start: row.start,
            end: row.start,
            progress: 0,
            type_internal: TaskTypeInternal::Milestone,
            x1: x - params.task_height * 0.5,
            x2: x + params.task_height * 0.5,
            y,
            height: params.task_height / SQRT_2,
            progress_x: 0.0,
            progress_width: 0.0,
            bar_corner_radius: params.bar_corner_radius,
            handle_width: params.handle_width,
            hide_children: None,
            has_overlapping_children: row.has_overlapping_children,
            styles,
            segments: Vec::new(),
            bar_children: SmallVec::new(),
        };
    }

    let (x1, mut x2) = if params.rtl {
        (
            x_from_instant_rtl(row.end, ticks, params.column_width),
            x_from_instant_rtl(row.start, ticks, params.column_width),
        )
    } else {
        (
            x_from_instant(row.start, ticks, params.column_width),
            x_from_instant(row.end, ticks, params.column_width),
        )
    };

    let mut type_internal = match task.kind {
        TaskType::Project => TaskTypeInternal::Project,
        _ => TaskTypeInternal::Task,
    };
    let min_width = params.handle_width * 2.0;
    if task.kind == TaskType::Task && x2 - x1 < min_width {
        type_internal = TaskTypeInternal::SmallTask;
        x2 = x1 + min_width;
    }

    let progress = task.progress.min(100);
    let (progress_width, progress_x) = progress_with_by_params(x1, x2, progress, params.rtl);
    let segments = project_segments(row, x1, x2, params.rtl);

    BarTask {
        task: task.clone(),
        index,
        depth: row.depth,
        parent_id: row.parent_id.clone(),
        start: row.start,
        end: row.end,
        progress,
        type_internal,
        x1,
        x2,
        y,
        height: params.task_height,
        progress_x,
        progress_width,
        bar_corner_radius: params.bar_corner_radius,
        handle_width: params.handle_width,
        hide_children: task.hide_children.filter(|_| task.has_children()),
        has_overlapping_children: row.has_overlapping_children,
        styles,
        segments,
        bar_children: SmallVec::new(),
    }
}

/// Child spans clamped to the parent span and laid out inside `[x1, x2]`.
fn project_segments(row: &TaskRow, x1: f64, x2: f64, rtl: bool) -> Vec<BarSegment> {
    let parent_duration = (row.end - row.start) as f64;
    if parent_duration <= 0.0 {
        return Vec::new();
    }
    let parent_width = x2 - x1;

    row.task
        .children
        .iter()
        .enumerate()
        .filter_map(|(position, child)| {
            let (child_start, child_end) = child.span()?;
            let clamped_start = child_start.max(row.start);
            let clamped_end = child_end.min(row.end);
            if clamped_end <= clamped_start {
                return None;
            }
            let offset = (clamped_start - row.start) as f64 / parent_duration * parent_width;
            let width = (clamped_end - clamped_start) as f64 / parent_duration * parent_width;
            let (seg_x1, seg_x2) = if rtl {
                (x2 - offset - width, x2 - offset)
            } else {
                (x1 + offset, x1 + offset + width)
            };
            let (progress_width, progress_x) =
                progress_with_by_params(seg_x1, seg_x2, child.progress.min(100), rtl);
            Some(BarSegment {
                child_id: child.id.clone(),
                x1: seg_x1,
                x2: seg_x2,
                progress_x,
                progress_width,
                color: SEGMENT_COLORS[position % SEGMENT_COLORS.len()].to_owned(),
            })
        })
        .collect()
}
