//! Final transcript assembly.

use std::collections::HashMap;

use tracing::warn;
use weft_dag::{sequence, ReferenceDag};
use weft_store::StoredObject;
use weft_types::ObjectId;

use crate::message::{role_of, TranscriptMessage};
use crate::order::resolve_order;

/// Role dropped from every transcript. All other roles, known or not, are
/// retained unmodified.
const FILTERED_ROLE: &str = "system";

/// Run the full reconstruction pipeline over a store's objects.
///
/// Classify, build the reference DAG, sequence it, resolve message order,
/// and assemble the filtered transcript. Pure and idempotent: the same
/// objects always produce the same transcript.
pub fn reconstruct(objects: &[StoredObject]) -> Vec<TranscriptMessage> {
    let dag = ReferenceDag::build(objects);
    let storage_order: Vec<ObjectId> = objects.iter().map(|o| o.id).collect();
    let sequenced_ids = sequence(&storage_order, &dag);

    let by_id: HashMap<ObjectId, &StoredObject> =
        objects.iter().map(|o| (o.id, o)).collect();
    let sequenced: Vec<&StoredObject> = sequenced_ids
        .iter()
        .filter_map(|id| by_id.get(id).copied())
        .collect();
    let messages: Vec<&StoredObject> = objects.iter().filter(|o| o.is_message()).collect();

    let order = resolve_order(&sequenced, &messages);
    assemble(&messages, &order)
}

/// Sort, decode, filter, and number the message objects.
///
/// Messages sort by `(resolved order, storage order)`, with unresolved
/// messages after all resolved ones. Records whose role is exactly
/// `"system"` are dropped; decode failures skip that object only. The
/// retained records get contiguous 1-based sequence numbers.
pub fn assemble(
    messages: &[&StoredObject],
    order: &HashMap<ObjectId, u64>,
) -> Vec<TranscriptMessage> {
    let mut sorted: Vec<&StoredObject> = messages.to_vec();
    sorted.sort_by_key(|m| (order.get(&m.id).copied().unwrap_or(u64::MAX), m.seq));

    let mut transcript = Vec::with_capacity(sorted.len());
    for object in sorted {
        let body = match object.decode_message() {
            Ok(body) => body,
            Err(err) => {
                warn!(id = %object.id.short_hex(), %err, "skipping undecodable message object");
                continue;
            }
        };
        if role_of(&body) == Some(FILTERED_ROLE) {
            continue;
        }
        transcript.push(TranscriptMessage {
            id: object.id,
            sequence: transcript.len() as u64 + 1,
            source_seq: object.seq,
            body,
        });
    }
    transcript
}
