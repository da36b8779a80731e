//! Adjacency recovered from structural payloads.
//!
//! [`ReferenceDag`] is a derived structure: it is rebuilt from the object
//! store on every reconstruction and holds only identifiers, never payloads.
//!
//! # Invariants
//!
//! - Every id in the adjacency maps exists in the store (dangling
//!   references are filtered at extraction time).
//! - Only structural objects contribute edges; message payloads are never
//!   scanned.
//! - The maps record a child under `parents` only when at least one parent
//!   was accepted, so "has no entry" and "is a root candidate" coincide.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use weft_store::StoredObject;
use weft_types::ObjectId;

use crate::extract::extract_parents;

/// Parent/child adjacency over one session's object store.
#[derive(Clone, Debug, Default)]
pub struct ReferenceDag {
    /// Child -> accepted parent references, in payload scan order.
    parents: HashMap<ObjectId, Vec<ObjectId>>,
    /// Parent -> children, derived from the parent scan.
    children: HashMap<ObjectId, Vec<ObjectId>>,
}

impl ReferenceDag {
    /// Build the adjacency by scanning every structural object.
    ///
    /// The membership set is the full store id set, computed up front, so
    /// extraction does not depend on enumeration order.
    pub fn build(objects: &[StoredObject]) -> Self {
        let known_ids: HashSet<ObjectId> = objects.iter().map(|o| o.id).collect();

        let mut parents: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();
        let mut children: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();

        for object in objects.iter().filter(|o| !o.is_message()) {
            let found = extract_parents(&object.data, &known_ids);
            if found.is_empty() {
                continue;
            }
            debug!(
                child = %object.id.short_hex(),
                count = found.len(),
                "recovered parent references"
            );
            for parent in &found {
                children.entry(*parent).or_default().push(object.id);
            }
            parents.insert(object.id, found);
        }

        Self { parents, children }
    }

    /// Accepted parent references of an object (empty for roots).
    pub fn parents_of(&self, id: &ObjectId) -> &[ObjectId] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Children discovered for an object.
    pub fn children_of(&self, id: &ObjectId) -> &[ObjectId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if no parent reference was recorded for this id.
    pub fn is_root(&self, id: &ObjectId) -> bool {
        !self.parents.contains_key(id)
    }

    /// Number of objects with at least one recorded parent.
    pub fn edge_count(&self) -> usize {
        self.parents.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PARENT_TAG;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    /// A structural payload referencing the given parents.
    fn structural(seq: u64, id: ObjectId, parents: &[ObjectId]) -> StoredObject {
        let mut data = vec![0x08, 0x01]; // leading non-marker noise
        for parent in parents {
            data.extend(PARENT_TAG);
            data.extend_from_slice(parent.as_bytes());
        }
        StoredObject::new(id, seq, data)
    }

    fn message(seq: u64, id: ObjectId) -> StoredObject {
        StoredObject::new(id, seq, b"{\"role\":\"user\"}".to_vec())
    }

    #[test]
    fn empty_store_builds_empty_dag() {
        let dag = ReferenceDag::build(&[]);
        assert_eq!(dag.edge_count(), 0);
        assert!(dag.is_root(&oid(1)));
    }

    #[test]
    fn records_parent_and_child() {
        let root = structural(1, oid(1), &[]);
        let child = structural(2, oid(2), &[oid(1)]);
        let dag = ReferenceDag::build(&[root, child]);

        assert_eq!(dag.parents_of(&oid(2)), &[oid(1)]);
        assert_eq!(dag.children_of(&oid(1)), &[oid(2)]);
        assert!(dag.is_root(&oid(1)));
        assert!(!dag.is_root(&oid(2)));
    }

    #[test]
    fn message_payloads_contribute_no_edges() {
        // A message whose JSON happens to contain tag-shaped bytes must not
        // be scanned.
        let parent = structural(1, oid(1), &[]);
        let msg = message(2, oid(2));
        let dag = ReferenceDag::build(&[parent, msg]);
        assert_eq!(dag.edge_count(), 0);
        assert!(dag.is_root(&oid(2)));
    }

    #[test]
    fn dangling_reference_leaves_object_a_root() {
        let lonely = structural(1, oid(1), &[oid(99)]);
        let dag = ReferenceDag::build(&[lonely]);
        assert!(dag.is_root(&oid(1)));
        assert_eq!(dag.edge_count(), 0);
    }

    #[test]
    fn diamond_adjacency() {
        let a = structural(1, oid(1), &[]);
        let b = structural(2, oid(2), &[oid(1)]);
        let c = structural(3, oid(3), &[oid(1)]);
        let d = structural(4, oid(4), &[oid(2), oid(3)]);
        let dag = ReferenceDag::build(&[a, b, c, d]);

        assert_eq!(dag.parents_of(&oid(4)), &[oid(2), oid(3)]);
        assert_eq!(dag.children_of(&oid(1)), &[oid(2), oid(3)]);
        assert_eq!(dag.edge_count(), 4);
    }

    #[test]
    fn extraction_is_order_independent() {
        // The child enumerates before its parent; membership is still
        // checked against the full store.
        let child = structural(1, oid(2), &[oid(1)]);
        let parent = structural(2, oid(1), &[]);
        let dag = ReferenceDag::build(&[child, parent]);
        assert_eq!(dag.parents_of(&oid(2)), &[oid(1)]);
    }
}
