//! Domain types for RobotStore
//!
//! Core domain types: Task, Robot
//! Both implement the Record trait so a single Collection type can hold either.

mod priority;
mod record;
mod robot;
mod task;

pub use priority::PriorityBucket;
pub use record::{Record, RecordId};
pub use robot::{Robot, RobotDraft};
pub use task::{Task, TaskDraft, TaskStatus};
