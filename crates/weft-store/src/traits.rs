use crate::error::StoreResult;
use crate::object::StoredObject;

/// A raw metadata entry from the session's key/value table.
///
/// Values may be hex-encoded JSON, plain text, or arbitrary bytes; decoding
/// is the transcript layer's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaEntry {
    pub key: String,
    pub value: Vec<u8>,
}

/// Read-only handle over one session's object store.
///
/// All implementations must satisfy these invariants:
/// - Enumeration returns objects in their natural storage order, and that
///   order is stable across calls for an unchanged store.
/// - The store is never mutated through this trait; the producing system
///   owns all writes.
/// - A malformed individual record degrades that record, not the call.
pub trait SessionStore {
    /// Enumerate every object in natural storage order.
    fn objects(&self) -> StoreResult<Vec<StoredObject>>;

    /// The session's raw metadata key/value table.
    fn metadata(&self) -> StoreResult<Vec<MetaEntry>>;

    /// Count of objects classified as message objects.
    ///
    /// Default implementation enumerates and counts. Backends may override
    /// to avoid loading payloads (e.g., a single SQL aggregate).
    fn message_count(&self) -> StoreResult<u64> {
        let objects = self.objects()?;
        Ok(objects.iter().filter(|o| o.is_message()).count() as u64)
    }

    /// The most recently stored message object, by storage order.
    ///
    /// This is the cheap listing summary, intentionally not the transcript's
    /// resolved latest message. Default implementation enumerates; backends
    /// may override.
    fn last_message(&self) -> StoreResult<Option<StoredObject>> {
        let objects = self.objects()?;
        Ok(objects.into_iter().rev().find(|o| o.is_message()))
    }
}
