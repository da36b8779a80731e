use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use weft_transcript::TranscriptMessage;

/// One row of a session listing.
///
/// Cheap to produce: classification count and the storage-order preview,
/// no graph reconstruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session directory name.
    pub id: String,
    /// Display name from metadata, or the producer's default.
    pub name: String,
    /// Creation time, best-effort: metadata first, file mtimes as fallback.
    pub created_at: Option<DateTime<Utc>>,
    /// Operating mode recorded by the producer, when present.
    pub mode: Option<String>,
    /// Producer's agent identifier, when present.
    pub agent_id: Option<String>,
    /// Count of objects classified as message objects.
    pub message_count: u64,
    /// Truncated text of the most recently stored message.
    pub last_message_preview: Option<String>,
}

/// A fully reconstructed session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionTranscript {
    /// Session directory name.
    pub id: String,
    /// Ordered, filtered conversation records.
    pub messages: Vec<TranscriptMessage>,
    /// Decoded metadata table.
    pub metadata: BTreeMap<String, Value>,
}
