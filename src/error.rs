use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GanttError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("task id `{0}` appears more than once in the task tree")]
    DuplicateTaskId(String),

    #[error("unknown task `{0}`")]
    UnknownTask(String),

    #[error("a gesture is already active on task `{0}`")]
    GestureInProgress(String),

    #[error("no gesture is active")]
    NoActiveGesture,

    #[error("task `{0}` has a commit in flight")]
    TaskLocked(String),

    #[error("unknown commit id {0}")]
    UnknownCommit(u64),
}
