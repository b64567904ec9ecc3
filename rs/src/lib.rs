//! RobotStore - robot and task collections with best-effort persistence
//!
//! Owns two insertion-ordered collections (tasks and the robots they are
//! assigned to), hands out immutable snapshots, notifies subscribers after
//! every change, and mirrors the whole state into a key-value medium.
//!
//! # Architecture
//!
//! ```text
//! DashboardStore
//! ├── TaskStore   (Collection<Task>)
//! ├── RobotStore  (Collection<Robot>)
//! └── listeners ──► Persistence<S: KeyValueStorage>
//!                     ├── "tasks"  -> JSON array
//!                     └── "robots" -> JSON array
//! ```
//!
//! # Example
//!
//! ```ignore
//! use robotstore::{MemoryStorage, Persistence, StoreConfig, TaskDraft, TaskStatus};
//!
//! let mut store = Persistence::new(MemoryStorage::new()).open_store(StoreConfig::default());
//! let task = store.add_task(TaskDraft::new("Charge batteries", TaskStatus::Pending, 1, 2))?;
//! let stats = robotstore::selectors::dashboard(&store.tasks(), &store.robots());
//! ```

pub mod collection;
pub mod domain;
pub mod error;
pub mod events;
pub mod persistence;
pub mod seed;
pub mod selectors;
pub mod storage;
pub mod store;
pub mod validation;

pub use collection::{Collection, RobotStore, TaskStore};
pub use domain::{PriorityBucket, Record, RecordId, Robot, RobotDraft, Task, TaskDraft, TaskStatus};
pub use error::{PersistenceError, StorageError, StoreError, StoreResult};
pub use events::{Snapshot, StoreEvent, SubscriptionId};
pub use persistence::{LoadedState, Persistence};
pub use selectors::{DashboardStats, FilterSummary, PriorityBuckets, RobotAggregate, StatusCounts, TaskFilter};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{DashboardStore, MissingPolicy, StoreConfig};
pub use validation::{FieldError, RobotForm, TaskForm, ValidationErrors};

/// Storage key for the persisted task collection
pub const TASKS_KEY: &str = "tasks";

/// Storage key for the persisted robot collection
pub const ROBOTS_KEY: &str = "robots";
