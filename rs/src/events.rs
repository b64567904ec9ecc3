//! Change notifications
//!
//! Subscribers register a callback with the store and receive every
//! state-changing event together with the snapshot that resulted from it.
//! Delivery is synchronous and in registration order.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{RecordId, Robot, Task};

/// Event emitted after a mutation changed the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(RecordId),
    TaskUpdated(RecordId),
    TaskDeleted(RecordId),
    RobotAdded(RecordId),
    RobotUpdated(RecordId),
    RobotDeleted(RecordId),
}

impl StoreEvent {
    /// Short event type name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TaskAdded(_) => "task_added",
            Self::TaskUpdated(_) => "task_updated",
            Self::TaskDeleted(_) => "task_deleted",
            Self::RobotAdded(_) => "robot_added",
            Self::RobotUpdated(_) => "robot_updated",
            Self::RobotDeleted(_) => "robot_deleted",
        }
    }

    /// Id of the record the event is about
    pub fn record_id(&self) -> RecordId {
        match self {
            Self::TaskAdded(id)
            | Self::TaskUpdated(id)
            | Self::TaskDeleted(id)
            | Self::RobotAdded(id)
            | Self::RobotUpdated(id)
            | Self::RobotDeleted(id) => *id,
        }
    }
}

/// Both collections at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tasks: Arc<Vec<Task>>,
    pub robots: Arc<Vec<Robot>>,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent, &Snapshot) + Send>;

/// Registered listeners in subscription order
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        debug!(?id, count = self.entries.len(), "Listeners::add: subscribed");
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        before != self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver an event to every listener
    pub(crate) fn emit(&mut self, event: &StoreEvent, snapshot: &Snapshot) {
        debug!(
            event_type = event.event_type(),
            record_id = event.record_id(),
            listeners = self.entries.len(),
            "Listeners::emit"
        );
        for (_, listener) in self.entries.iter_mut() {
            listener(event, snapshot);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("count", &self.entries.len()).finish()
    }
}
