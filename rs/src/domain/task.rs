//! Task domain type
//!
//! A unit of work assigned to a robot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::priority::PriorityBucket;
use super::record::{Record, RecordId};

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,
    /// Done
    Completed,
}

impl TaskStatus {
    /// All statuses in display order
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// A task as submitted, before an id has been allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    pub status: TaskStatus,
    /// Robot the task is assigned to. Advisory: the robot may not exist.
    pub robot_id: RecordId,
    pub priority: u32,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, status: TaskStatus, robot_id: RecordId, priority: u32) -> Self {
        Self {
            name: name.into(),
            status,
            robot_id,
            priority,
        }
    }
}

/// A task tracked by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub name: String,
    pub status: TaskStatus,
    pub robot_id: RecordId,
    pub priority: u32,
}

impl Task {
    pub fn new(id: RecordId, name: impl Into<String>, status: TaskStatus, robot_id: RecordId, priority: u32) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            robot_id,
            priority,
        }
    }

    /// Priority bucket this task falls into
    pub fn bucket(&self) -> PriorityBucket {
        PriorityBucket::of(self.priority)
    }

    /// Strip the id, e.g. to re-validate an edited copy
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            status: self.status,
            robot_id: self.robot_id,
            priority: self.priority,
        }
    }
}

impl Record for Task {
    type Draft = TaskDraft;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: TaskDraft) -> Self {
        debug!(id, name = %draft.name, "Task::from_draft: called");
        Self {
            id,
            name: draft.name,
            status: draft.status,
            robot_id: draft.robot_id,
            priority: draft.priority,
        }
    }

    fn collection_name() -> &'static str {
        crate::TASKS_KEY
    }
}
