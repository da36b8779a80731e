//! Tolerant byte scanning over structural payloads.
//!
//! The structural encoding has no published schema. What holds across
//! observed stores is that a parent link appears as a two-byte tag followed
//! by the parent's raw 32-byte hash, and that message links embed the raw
//! hash without any tag. Both constants below are inferred from sample
//! data, not a guaranteed wire format; the scan therefore verifies every
//! candidate against the store's id set before accepting it.

use std::collections::HashSet;

use weft_types::ObjectId;

/// Tag bytes preceding an embedded parent identifier.
pub const PARENT_TAG: [u8; 2] = [0x0A, 0x20];

/// Length of an embedded identifier in bytes.
pub const ID_LEN: usize = 32;

/// Scan a structural payload for tagged parent references.
///
/// Moves a cursor across the buffer; at each tag match the following
/// [`ID_LEN`] bytes are checked for membership in `known_ids`. A hit records
/// the parent and skips the consumed bytes; a miss (false tag collision or
/// dangling reference) advances one byte and keeps scanning, so candidates
/// overlapping a rejected window are still found.
///
/// A payload with no accepted matches is a root candidate. The scan never
/// fails: malformed input yields an empty result.
pub fn extract_parents(data: &[u8], known_ids: &HashSet<ObjectId>) -> Vec<ObjectId> {
    let mut parents = Vec::new();
    let record_len = PARENT_TAG.len() + ID_LEN;
    let mut i = 0;
    while i + record_len <= data.len() {
        if data[i..i + PARENT_TAG.len()] == PARENT_TAG {
            let mut hash = [0u8; ID_LEN];
            hash.copy_from_slice(&data[i + PARENT_TAG.len()..i + record_len]);
            let candidate = ObjectId::from_hash(hash);
            if known_ids.contains(&candidate) {
                parents.push(candidate);
                i += record_len;
                continue;
            }
        }
        i += 1;
    }
    parents
}

/// Test whether a structural payload embeds a message object's identifier.
///
/// Message links carry no tag, so this is plain substring containment of
/// the raw hash bytes. Looser than the tagged scan by design.
pub fn references_message(data: &[u8], id: &ObjectId) -> bool {
    let needle = id.as_bytes();
    data.windows(needle.len()).any(|window| window == needle)
}
