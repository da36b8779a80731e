use serde_json::Value;
use weft_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// First byte of every message payload (`{`, the JSON object opener).
///
/// The storage format is otherwise undocumented; this single-byte probe is
/// the only stable discriminator between conversation records and the
/// binary structural records interleaved with them.
pub const MESSAGE_MARKER: u8 = 0x7B;

/// The kind of payload stored, decided from its leading byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// JSON conversation record (role + content).
    Message,
    /// Opaque binary record encoding graph edges between objects.
    Structural,
}

impl ObjectKind {
    /// Classify a raw payload. Empty payloads are structural.
    pub fn of(data: &[u8]) -> Self {
        if data.first() == Some(&MESSAGE_MARKER) {
            Self::Message
        } else {
            Self::Structural
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Structural => write!(f, "structural"),
        }
    }
}

/// A stored object: content id + natural storage position + raw payload.
///
/// `seq` is the record's position in storage order (the SQLite `rowid`,
/// 1-based). It is the tie-breaker of last resort throughout the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// Content-addressed identifier.
    pub id: ObjectId,
    /// Natural storage order (insertion sequence).
    pub seq: u64,
    /// The raw payload bytes.
    pub data: Vec<u8>,
}

impl StoredObject {
    /// Create a stored object from its parts.
    pub fn new(id: ObjectId, seq: u64, data: Vec<u8>) -> Self {
        Self { id, seq, data }
    }

    /// Classify this object's payload.
    pub fn kind(&self) -> ObjectKind {
        ObjectKind::of(&self.data)
    }

    /// Returns `true` if the payload is a message object.
    pub fn is_message(&self) -> bool {
        self.kind() == ObjectKind::Message
    }

    /// Decode the payload as a JSON conversation record.
    ///
    /// Fails with [`StoreError::MalformedMessage`] when the payload is not a
    /// message object or carries invalid JSON. Callers treat that as a
    /// per-object condition: log it and drop the object, never the session.
    pub fn decode_message(&self) -> StoreResult<Value> {
        if self.kind() != ObjectKind::Message {
            return Err(StoreError::MalformedMessage {
                id: self.id,
                reason: "payload is not a message object".into(),
            });
        }
        serde_json::from_slice(&self.data).map_err(|e| StoreError::MalformedMessage {
            id: self.id,
            reason: e.to_string(),
        })
    }
}
