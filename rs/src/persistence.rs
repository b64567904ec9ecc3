//! Persistence adapter
//!
//! Mirrors both collections into a key-value medium as two JSON arrays.
//! Persistence is best-effort: read failures fall back to defaults, write
//! failures are logged and counted but never reach the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::{Record, Robot, Task};
use crate::error::PersistenceError;
use crate::events::{Snapshot, SubscriptionId};
use crate::seed;
use crate::storage::KeyValueStorage;
use crate::store::{DashboardStore, StoreConfig};

/// Collections read back from storage
///
/// A field is `None` when nothing usable was stored for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedState {
    pub tasks: Option<Vec<Task>>,
    pub robots: Option<Vec<Robot>>,
}

impl LoadedState {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_none() && self.robots.is_none()
    }
}

/// Reads and writes the persisted collections
///
/// Clones share the failure counter, so a clone attached to a store reports
/// into the same counter as the handle kept by the caller.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
    failed_saves: Arc<AtomicU64>,
}

impl<S: KeyValueStorage> Persistence<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            failed_saves: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read both collections, propagating any failure
    pub fn try_load(&self) -> Result<LoadedState, PersistenceError> {
        Ok(LoadedState {
            tasks: self.read_collection::<Task>()?,
            robots: self.read_collection::<Robot>()?,
        })
    }

    /// Read both collections; any failure yields an empty result
    pub fn load(&self) -> LoadedState {
        match self.try_load() {
            Ok(state) => {
                debug!(
                    tasks = ?state.tasks.as_ref().map(Vec::len),
                    robots = ?state.robots.as_ref().map(Vec::len),
                    "Persistence::load: loaded"
                );
                state
            }
            Err(e) => {
                warn!(error = %e, "Failed to load persisted state, using defaults");
                LoadedState::default()
            }
        }
    }

    /// Write both collections, propagating the first failure
    pub fn try_save(&self, tasks: &[Task], robots: &[Robot]) -> Result<(), PersistenceError> {
        self.write_collection(tasks)?;
        self.write_collection(robots)?;
        Ok(())
    }

    /// Write both collections; returns false (and logs) if anything failed
    pub fn save(&self, tasks: &[Task], robots: &[Robot]) -> bool {
        match self.try_save(tasks, robots) {
            Ok(()) => true,
            Err(e) => {
                let failures = self.failed_saves.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(error = %e, failures, "Failed to save state");
                false
            }
        }
    }

    /// Write a snapshot as produced by the store
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> bool {
        self.save(&snapshot.tasks, &snapshot.robots)
    }

    /// Number of saves that failed so far
    pub fn failed_saves(&self) -> u64 {
        self.failed_saves.load(Ordering::Relaxed)
    }

    fn read_collection<R: Record>(&self) -> Result<Option<Vec<R>>, PersistenceError> {
        let key = R::collection_name();
        match self.storage.get(key)? {
            Some(text) => decode(key, &text).map(Some),
            None => Ok(None),
        }
    }

    fn write_collection<R: Record>(&self, records: &[R]) -> Result<(), PersistenceError> {
        let key = R::collection_name();
        let text = encode(key, records)?;
        self.storage.set(key, &text)?;
        Ok(())
    }
}

impl<S: KeyValueStorage + Clone + Send + 'static> Persistence<S> {
    /// Save the whole state after every change to `store`
    pub fn attach(&self, store: &mut DashboardStore) -> SubscriptionId {
        let persistence = self.clone();
        store.subscribe(move |event, snapshot| {
            debug!(event_type = event.event_type(), "Persistence: saving after change");
            persistence.save_snapshot(snapshot);
        })
    }

    /// Build a store from persisted state and keep it persisted
    ///
    /// Collections with no usable persisted state start from the built-in defaults.
    pub fn open_store(&self, config: StoreConfig) -> DashboardStore {
        let loaded = self.load();
        let from_storage = !loaded.is_empty();
        let tasks = loaded.tasks.unwrap_or_else(seed::default_tasks);
        let robots = loaded.robots.unwrap_or_else(seed::default_robots);
        info!(from_storage, "Opening dashboard store");

        let mut store = DashboardStore::with_state(tasks, robots, config);
        self.attach(&mut store);
        store
    }
}

fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Encode { key, source })
}

fn decode<T: DeserializeOwned>(key: &'static str, text: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(text).map_err(|source| PersistenceError::Decode { key, source })
}
