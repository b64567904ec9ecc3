//! Form validation run before any mutation reaches the store
//!
//! A form holds raw user input. `validate` either produces the draft the
//! store accepts or one error per offending field.

use thiserror::Error;
use tracing::debug;

use crate::domain::{RecordId, RobotDraft, TaskDraft, TaskStatus};

/// One failed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failed fields of a form, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Message for the given field, if it failed
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn format_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.errors.push(FieldError { field, message });
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(ValidationErrors { errors: self.errors })
        }
    }
}

/// Raw task form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub name: String,
    pub status: TaskStatus,
    /// `None` until a robot has been selected
    pub robot_id: Option<RecordId>,
    pub priority: i64,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: TaskStatus::Pending,
            robot_id: None,
            priority: 1,
        }
    }
}

impl TaskForm {
    pub fn validate(&self) -> Result<TaskDraft, ValidationErrors> {
        debug!(name = %self.name, robot_id = ?self.robot_id, priority = self.priority, "TaskForm::validate: called");
        let mut collector = Collector::default();
        collector.check(!self.name.trim().is_empty(), "name", "Name is required");
        collector.check(self.robot_id.is_some(), "robot_id", "Robot selection is required");
        let priority = if self.priority < 1 {
            collector.check(false, "priority", "Priority must be a positive number");
            None
        } else {
            let priority = u32::try_from(self.priority).ok();
            collector.check(priority.is_some(), "priority", "Priority is too large");
            priority
        };

        collector.finish(|| TaskDraft {
            name: self.name.clone(),
            status: self.status,
            robot_id: self.robot_id.unwrap_or_default(),
            priority: priority.unwrap_or_default(),
        })
    }
}

/// Raw robot form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotForm {
    pub name: String,
    pub description: String,
}

impl RobotForm {
    pub fn validate(&self) -> Result<RobotDraft, ValidationErrors> {
        debug!(name = %self.name, "RobotForm::validate: called");
        let mut collector = Collector::default();
        collector.check(!self.name.trim().is_empty(), "name", "Name is required");
        collector.check(
            !self.description.trim().is_empty(),
            "description",
            "Description is required",
        );

        collector.finish(|| RobotDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}
