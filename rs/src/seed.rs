//! Built-in default records
//!
//! Used whenever persisted state for a collection is absent.

use crate::domain::{Robot, Task, TaskStatus};

/// Default task collection
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Clean Room", TaskStatus::Pending, 1, 1),
        Task::new(2, "Deliver Package", TaskStatus::InProgress, 2, 2),
        Task::new(3, "Assemble Parts", TaskStatus::Completed, 1, 3),
    ]
}

/// Default robot collection
pub fn default_robots() -> Vec<Robot> {
    vec![
        Robot::new(1, "Robot A", "Cleaning robot"),
        Robot::new(2, "Robot B", "Delivery robot"),
    ]
}
