//! High-level API for weft.
//!
//! Outer layers (the CLI, or anything embedding the engine) talk to
//! [`SessionDirectory`]: a handle over a directory whose children are
//! session directories, each holding one `store.db`. Listing is cheap and
//! never runs the graph pipeline; reconstruction runs the full
//! classify → build → sequence → resolve → assemble chain.

pub mod directory;
pub mod error;
pub mod session;

pub use directory::SessionDirectory;
pub use error::{SdkError, SdkResult};
pub use session::{SessionSummary, SessionTranscript};

// Re-export key types
pub use weft_transcript::TranscriptMessage;
pub use weft_types::ObjectId;
