//! Insertion-ordered record collections
//!
//! A Collection owns one ordered list of records behind an `Arc`. Every
//! mutation goes through `Arc::make_mut`, so snapshots handed out earlier
//! keep seeing the state they were taken from.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Record, RecordId, Robot, Task};

/// The task collection
pub type TaskStore = Collection<Task>;

/// The robot collection
pub type RobotStore = Collection<Robot>;

/// Ordered collection of records with monotonic id allocation
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    records: Arc<Vec<R>>,
    /// Largest id this collection has ever held
    high_water: RecordId,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            high_water: 0,
        }
    }

    /// Create a collection from existing records, keeping their order
    pub fn from_records(records: Vec<R>) -> Self {
        let high_water = records.iter().map(Record::id).max().unwrap_or(0);
        debug!(
            collection = R::collection_name(),
            len = records.len(),
            high_water,
            "Collection::from_records: called"
        );
        Self {
            records: Arc::new(records),
            high_water,
        }
    }

    /// Current snapshot of the whole collection
    pub fn records(&self) -> Arc<Vec<R>> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id this collection has ever held
    pub fn high_water(&self) -> RecordId {
        self.high_water
    }

    /// Id the next `add` will assign, `None` once the id space is used up
    pub fn next_id(&self) -> Option<RecordId> {
        self.high_water.checked_add(1)
    }

    /// Append a new record built from `draft` and return it
    ///
    /// Returns `None` (collection unchanged) when no id above the high-water
    /// mark is left.
    pub fn add(&mut self, draft: R::Draft) -> Option<R> {
        let Some(id) = self.next_id() else {
            warn!(
                collection = R::collection_name(),
                high_water = self.high_water,
                "Collection::add: id space exhausted"
            );
            return None;
        };
        let record = R::from_draft(id, draft);
        Arc::make_mut(&mut self.records).push(record.clone());
        self.high_water = id;
        debug!(collection = R::collection_name(), id, "Collection::add: appended");
        Some(record)
    }

    /// Replace the record with the same id in place
    ///
    /// Returns the previous record, or `None` (collection unchanged) when no
    /// record has that id.
    pub fn update(&mut self, record: R) -> Option<R> {
        let id = record.id();
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            debug!(collection = R::collection_name(), id, "Collection::update: no such id");
            return None;
        };
        let previous = std::mem::replace(&mut Arc::make_mut(&mut self.records)[index], record);
        debug!(collection = R::collection_name(), id, index, "Collection::update: replaced");
        Some(previous)
    }

    /// Remove every record with the given id, returning how many were removed
    pub fn delete(&mut self, id: RecordId) -> usize {
        if !self.contains(id) {
            debug!(collection = R::collection_name(), id, "Collection::delete: no such id");
            return 0;
        }
        let records = Arc::make_mut(&mut self.records);
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = before - records.len();
        debug!(collection = R::collection_name(), id, removed, "Collection::delete: removed");
        removed
    }
}
