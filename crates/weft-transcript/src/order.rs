//! Message order resolution.
//!
//! The structural layer encodes the authoritative causal order; message
//! payloads carry no sequence field of their own. Walking the sequenced
//! structural objects and noting where each message id first appears
//! recovers that order transitively.

use std::collections::HashMap;

use weft_dag::references_message;
use weft_store::StoredObject;
use weft_types::ObjectId;

/// Map each message object to its inferred position.
///
/// `sequenced` is the full store in dependency order; only structural
/// payloads are scanned. The first structural object whose bytes contain a
/// not-yet-assigned message id assigns it the next index, starting at 0.
/// Messages never referenced by any structural object are absent from the
/// result; callers sort them after all assigned ones by storage order.
///
/// Pure function of its inputs — assignment state lives here, not on any
/// long-lived structure.
pub fn resolve_order(
    sequenced: &[&StoredObject],
    messages: &[&StoredObject],
) -> HashMap<ObjectId, u64> {
    let mut order: HashMap<ObjectId, u64> = HashMap::with_capacity(messages.len());
    let mut next_index: u64 = 0;

    for structural in sequenced.iter().filter(|o| !o.is_message()) {
        for message in messages {
            if order.contains_key(&message.id) {
                continue;
            }
            if references_message(&structural.data, &message.id) {
                order.insert(message.id, next_index);
                next_index += 1;
            }
        }
        if order.len() == messages.len() {
            break;
        }
    }

    order
}
