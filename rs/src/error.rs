//! Error types for store, storage and persistence operations

use thiserror::Error;

use crate::domain::RecordId;

/// Errors from store mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Only produced under [`MissingPolicy::Strict`](crate::MissingPolicy::Strict);
    /// with the default policy a missing id is a silent no-op.
    #[error("{collection} record not found: {id}")]
    NotFound { collection: &'static str, id: RecordId },

    #[error("No {collection} id left above {high_water}")]
    IdSpaceExhausted {
        collection: &'static str,
        high_water: RecordId,
    },
}

/// Result of a store mutation
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from a key-value storage medium
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from loading or saving the persisted collections
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode {key}: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
