//! DashboardStore - owns the task and robot collections
//!
//! The store is constructed explicitly and passed to whoever needs it. It is
//! the single writer for both collections; readers pull immutable snapshots
//! and subscribers are told about every change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collection::{RobotStore, TaskStore};
use crate::domain::{Record, RecordId, Robot, RobotDraft, Task, TaskDraft};
use crate::error::{StoreError, StoreResult};
use crate::events::{Listeners, Snapshot, StoreEvent, SubscriptionId};
use crate::seed;

/// What update/delete do when the target id does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Leave the store unchanged and report nothing
    #[default]
    Ignore,
    /// Leave the store unchanged and return `StoreError::NotFound`
    Strict,
}

/// Store behaviour settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Handling of update/delete for ids that do not exist
    #[serde(default)]
    pub missing: MissingPolicy,
}

/// In-memory state container for tasks and robots
#[derive(Debug)]
pub struct DashboardStore {
    tasks: TaskStore,
    robots: RobotStore,
    config: StoreConfig,
    listeners: Listeners,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl DashboardStore {
    /// Create a store holding the built-in default records
    pub fn new(config: StoreConfig) -> Self {
        Self::with_state(seed::default_tasks(), seed::default_robots(), config)
    }

    /// Create a store holding the given records
    pub fn with_state(tasks: Vec<Task>, robots: Vec<Robot>, config: StoreConfig) -> Self {
        info!(
            tasks = tasks.len(),
            robots = robots.len(),
            missing = ?config.missing,
            "DashboardStore created"
        );
        Self {
            tasks: TaskStore::from_records(tasks),
            robots: RobotStore::from_records(robots),
            config,
            listeners: Listeners::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // === Reads ===

    /// Current task collection
    pub fn tasks(&self) -> Arc<Vec<Task>> {
        self.tasks.records()
    }

    /// Current robot collection
    pub fn robots(&self) -> Arc<Vec<Robot>> {
        self.robots.records()
    }

    pub fn task(&self, id: RecordId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn robot(&self, id: RecordId) -> Option<&Robot> {
        self.robots.get(id)
    }

    /// Both collections as they are right now
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.records(),
            robots: self.robots.records(),
        }
    }

    // === Subscriptions ===

    /// Register a listener called after every state-changing mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &Snapshot) + Send + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        debug!(?id, "DashboardStore::unsubscribe: called");
        self.listeners.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // === Task operations ===

    /// Append a new task and return it with its allocated id
    pub fn add_task(&mut self, draft: TaskDraft) -> StoreResult<Task> {
        debug!(name = %draft.name, "DashboardStore::add_task: called");
        let task = self.tasks.add(draft).ok_or_else(|| exhausted::<Task>(self.tasks.high_water()))?;
        self.notify(StoreEvent::TaskAdded(task.id));
        Ok(task)
    }

    /// Replace the task with the same id in place, returning the previous version
    pub fn update_task(&mut self, task: Task) -> StoreResult<Option<Task>> {
        let id = task.id;
        debug!(id, "DashboardStore::update_task: called");
        match self.tasks.update(task) {
            Some(previous) => {
                self.notify(StoreEvent::TaskUpdated(id));
                Ok(Some(previous))
            }
            None => self.missing::<Task>(id).map(|_| None),
        }
    }

    /// Remove the task with the given id, returning how many records were removed
    pub fn delete_task(&mut self, id: RecordId) -> StoreResult<usize> {
        debug!(id, "DashboardStore::delete_task: called");
        match self.tasks.delete(id) {
            0 => self.missing::<Task>(id).map(|_| 0),
            removed => {
                self.notify(StoreEvent::TaskDeleted(id));
                Ok(removed)
            }
        }
    }

    // === Robot operations ===

    /// Append a new robot and return it with its allocated id
    pub fn add_robot(&mut self, draft: RobotDraft) -> StoreResult<Robot> {
        debug!(name = %draft.name, "DashboardStore::add_robot: called");
        let robot = self.robots.add(draft).ok_or_else(|| exhausted::<Robot>(self.robots.high_water()))?;
        self.notify(StoreEvent::RobotAdded(robot.id));
        Ok(robot)
    }

    /// Replace the robot with the same id in place, returning the previous version
    pub fn update_robot(&mut self, robot: Robot) -> StoreResult<Option<Robot>> {
        let id = robot.id;
        debug!(id, "DashboardStore::update_robot: called");
        match self.robots.update(robot) {
            Some(previous) => {
                self.notify(StoreEvent::RobotUpdated(id));
                Ok(Some(previous))
            }
            None => self.missing::<Robot>(id).map(|_| None),
        }
    }

    /// Remove the robot with the given id. Tasks assigned to it are left as they are.
    pub fn delete_robot(&mut self, id: RecordId) -> StoreResult<usize> {
        debug!(id, "DashboardStore::delete_robot: called");
        match self.robots.delete(id) {
            0 => self.missing::<Robot>(id).map(|_| 0),
            removed => {
                self.notify(StoreEvent::RobotDeleted(id));
                Ok(removed)
            }
        }
    }

    fn missing<R: Record>(&self, id: RecordId) -> StoreResult<()> {
        match self.config.missing {
            MissingPolicy::Ignore => {
                debug!(collection = R::collection_name(), id, "DashboardStore: missing id ignored");
                Ok(())
            }
            MissingPolicy::Strict => Err(StoreError::NotFound {
                collection: R::collection_name(),
                id,
            }),
        }
    }

    fn notify(&mut self, event: StoreEvent) {
        let snapshot = self.snapshot();
        self.listeners.emit(&event, &snapshot);
    }
}

fn exhausted<R: Record>(high_water: RecordId) -> StoreError {
    StoreError::IdSpaceExhausted {
        collection: R::collection_name(),
        high_water,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use std::sync::Mutex;

    fn strict() -> StoreConfig {
        StoreConfig {
            missing: MissingPolicy::Strict,
        }
    }

    #[test]
    fn test_new_store_holds_defaults() {
        let store = DashboardStore::default();
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.robots().len(), 2);
        assert_eq!(store.task(2).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_add_task_appends_with_next_id() {
        let mut store = DashboardStore::default();
        let task = store.add_task(TaskDraft::new("New Task", TaskStatus::Pending, 1, 4)).unwrap();

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 4);
        assert_eq!(task, Task::new(4, "New Task", TaskStatus::Pending, 1, 4));
        assert_eq!(tasks[3], task);
    }

    #[test]
    fn test_update_missing_task_ignored_by_default() {
        let mut store = DashboardStore::default();
        let result = store.update_task(Task::new(99, "Ghost", TaskStatus::Pending, 1, 1));
        assert_eq!(result, Ok(None));
        assert_eq!(store.tasks().len(), 3);
    }

    #[test]
    fn test_update_missing_task_strict() {
        let mut store = DashboardStore::new(strict());
        let result = store.update_task(Task::new(99, "Ghost", TaskStatus::Pending, 1, 1));
        assert_eq!(result, Err(StoreError::NotFound { collection: "tasks", id: 99 }));
    }

    #[test]
    fn test_delete_missing_robot_strict() {
        let mut store = DashboardStore::new(strict());
        let err = store.delete_robot(7).unwrap_err();
        assert_eq!(err.to_string(), "robots record not found: 7");
        assert_eq!(store.robots().len(), 2);
    }

    #[test]
    fn test_delete_robot_keeps_assigned_tasks() {
        let mut store = DashboardStore::default();
        assert_eq!(store.delete_robot(1), Ok(1));
        assert_eq!(store.robots().len(), 1);
        assert_eq!(store.tasks().iter().filter(|t| t.robot_id == 1).count(), 2);
    }

    #[test]
    fn test_listeners_see_each_change_once() {
        let mut store = DashboardStore::default();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |event, snapshot| {
            sink.lock().unwrap().push((*event, snapshot.tasks.len(), snapshot.robots.len()));
        });

        store.add_task(TaskDraft::new("Sweep", TaskStatus::Pending, 2, 1)).unwrap();
        store.update_task(Task::new(1, "Clean Room", TaskStatus::Completed, 1, 1)).unwrap();
        store.delete_task(2).unwrap();
        store.add_robot(RobotDraft::new("Robot C", "Welding robot")).unwrap();
        store.update_robot(Robot::new(3, "Robot C", "Painting robot")).unwrap();
        store.delete_robot(3).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                (StoreEvent::TaskAdded(4), 4, 2),
                (StoreEvent::TaskUpdated(1), 4, 2),
                (StoreEvent::TaskDeleted(2), 3, 2),
                (StoreEvent::RobotAdded(3), 3, 3),
                (StoreEvent::RobotUpdated(3), 3, 3),
                (StoreEvent::RobotDeleted(3), 3, 2),
            ]
        );
    }

    #[test]
    fn test_add_when_id_space_exhausted() {
        let mut store = DashboardStore::with_state(
            vec![Task::new(RecordId::MAX, "Last", TaskStatus::Pending, 1, 1)],
            Vec::new(),
            StoreConfig::default(),
        );
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        store.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        let err = store.add_task(TaskDraft::new("One more", TaskStatus::Pending, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            StoreError::IdSpaceExhausted {
                collection: "tasks",
                high_water: RecordId::MAX,
            }
        );
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(*count.lock().unwrap(), 0);

        let robot = store.add_robot(RobotDraft::new("Robot A", "Cleaning robot")).unwrap();
        assert_eq!(robot.id, 1);
    }

    #[test]
    fn test_noop_mutations_do_not_notify() {
        let mut store = DashboardStore::default();
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        store.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        store.delete_task(42).unwrap();
        store.update_robot(Robot::new(42, "Ghost", "none")).unwrap();

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = DashboardStore::default();
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        let id = store.subscribe(move |_, _| *counter.lock().unwrap() += 1);
        assert_eq!(store.subscriber_count(), 1);

        store.delete_task(1).unwrap();
        assert!(store.unsubscribe(id));
        store.delete_task(2).unwrap();

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_store_config_deserialize() {
        let config: StoreConfig = serde_json::from_str(r#"{"missing":"strict"}"#).unwrap();
        assert_eq!(config.missing, MissingPolicy::Strict);

        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.missing, MissingPolicy::Ignore);
    }
}
