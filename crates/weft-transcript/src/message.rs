use serde::{Deserialize, Serialize};
use serde_json::Value;
use weft_types::ObjectId;

/// One entry of a reconstructed transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Content-addressed id of the backing message object.
    pub id: ObjectId,
    /// 1-based position in the final transcript.
    pub sequence: u64,
    /// Original storage position, kept for debugging.
    pub source_seq: u64,
    /// The decoded conversation record.
    pub body: Value,
}

impl TranscriptMessage {
    /// The record's role, checked at the top level and inside a nested
    /// `message` field.
    pub fn role(&self) -> Option<&str> {
        role_of(&self.body)
    }
}

/// Extract a record's role. Top-level `role` wins over `message.role`.
pub(crate) fn role_of(body: &Value) -> Option<&str> {
    body.get("role")
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("message")
                .and_then(|m| m.get("role"))
                .and_then(Value::as_str)
        })
}
