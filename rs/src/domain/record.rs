//! Record trait shared by every collection element

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Identifier of a record within its collection (positive, unique)
pub type RecordId = u64;

/// A record stored in a [`Collection`](crate::Collection)
///
/// Records are created from a draft (the record without its id) once the
/// collection has allocated an id, and are replaced wholesale on update.
pub trait Record: Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// The record minus its id, as submitted by a caller
    type Draft;

    /// The record's id
    fn id(&self) -> RecordId;

    /// Build the full record once an id has been allocated
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Collection name, also used as the persistence key
    fn collection_name() -> &'static str;
}
