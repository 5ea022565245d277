//! Generic record abstraction for the line-oriented store.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A structured payload that can live in a [`JsonlStore`](crate::JsonlStore).
///
/// The store treats records as opaque JSON objects keyed by the string
/// returned from [`Record::id`]. Uniqueness of ids is the caller's
/// responsibility, not the store's.
pub trait Record: Serialize + DeserializeOwned {
    /// The unique identifier of this record.
    fn id(&self) -> &str;
}
