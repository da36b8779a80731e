//! Transcript assembly for reconstructed sessions.
//!
//! Message payloads carry no sequence field; their order is inferred from
//! the structural layer. This crate takes a store's objects, leans on
//! `weft-dag` for the dependency order, maps each message to its first
//! structural referrer, filters system records, and emits the final
//! numbered transcript. It also hosts the two decoder chains used by the
//! listing surface: lightweight previews and metadata values.
//!
//! Everything here degrades per object: an undecodable payload is logged
//! and skipped, never fatal to the transcript.

pub mod assemble;
pub mod message;
pub mod metadata;
pub mod order;
pub mod preview;

pub use assemble::{assemble, reconstruct};
pub use message::TranscriptMessage;
pub use metadata::decode_metadata;
pub use order::resolve_order;
pub use preview::{content_text, preview, PREVIEW_MAX_CHARS};
