use std::collections::HashMap;

use weft_types::ObjectId;

use crate::error::StoreResult;
use crate::object::StoredObject;
use crate::traits::{MetaEntry, SessionStore};

/// In-memory session store for tests and embedding.
///
/// Writes are content-addressed (BLAKE3 over the payload) and idempotent,
/// matching the producer's invariant that identical content maps to one
/// identifier. Insertion order is preserved as the natural storage order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    objects: Vec<StoredObject>,
    index: HashMap<ObjectId, usize>,
    meta: Vec<MetaEntry>,
}

impl InMemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payload, returning its content-addressed id.
    ///
    /// Idempotent: re-inserting identical content returns the existing id
    /// without growing the store.
    pub fn insert(&mut self, data: Vec<u8>) -> ObjectId {
        let id = ObjectId::from_bytes(&data);
        if let Some(&pos) = self.index.get(&id) {
            return self.objects[pos].id;
        }
        let seq = self.objects.len() as u64 + 1;
        self.index.insert(id, self.objects.len());
        self.objects.push(StoredObject::new(id, seq, data));
        id
    }

    /// Append a raw metadata entry.
    pub fn insert_meta(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.meta.push(MetaEntry {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up a stored object by id.
    pub fn get(&self, id: &ObjectId) -> Option<&StoredObject> {
        self.index.get(id).map(|&pos| &self.objects[pos])
    }
}

impl SessionStore for InMemorySessionStore {
    fn objects(&self) -> StoreResult<Vec<StoredObject>> {
        Ok(self.objects.clone())
    }

    fn metadata(&self) -> StoreResult<Vec<MetaEntry>> {
        Ok(self.meta.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    #[test]
    fn insert_and_get() {
        let mut store = InMemorySessionStore::new();
        let id = store.insert(b"{\"role\":\"user\"}".to_vec());
        let obj = store.get(&id).unwrap();
        assert_eq!(obj.kind(), ObjectKind::Message);
        assert_eq!(obj.seq, 1);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut store = InMemorySessionStore::new();
        let id1 = store.insert(b"same".to_vec());
        let id2 = store.insert(b"same".to_vec());
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn enumeration_preserves_insertion_order() {
        let mut store = InMemorySessionStore::new();
        let a = store.insert(b"first".to_vec());
        let b = store.insert(b"second".to_vec());
        let c = store.insert(b"third".to_vec());

        let objects = store.objects().unwrap();
        assert_eq!(
            objects.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![a, b, c]
        );
        assert_eq!(
            objects.iter().map(|o| o.seq).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn default_message_count_counts_markers() {
        let mut store = InMemorySessionStore::new();
        store.insert(b"{\"role\":\"user\"}".to_vec());
        store.insert(vec![0x0A, 0x20, 0x01]);
        store.insert(b"{\"role\":\"assistant\"}".to_vec());
        assert_eq!(store.message_count().unwrap(), 2);
    }

    #[test]
    fn default_last_message_skips_structural_tail() {
        let mut store = InMemorySessionStore::new();
        let msg = store.insert(b"{\"content\":\"hi\"}".to_vec());
        store.insert(vec![0x08, 0x01]);
        let last = store.last_message().unwrap().unwrap();
        assert_eq!(last.id, msg);
    }

    #[test]
    fn metadata_roundtrip() {
        let mut store = InMemorySessionStore::new();
        store.insert_meta("name", b"demo".to_vec());
        let meta = store.metadata().unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].key, "name");
    }

    #[test]
    fn empty_store() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.message_count().unwrap(), 0);
        assert!(store.last_message().unwrap().is_none());
    }
}
