//! Foundation types for weft.
//!
//! This crate provides the core identifier and timestamp types used
//! throughout the session-reconstruction engine. Every other weft crate
//! depends on `weft-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Content-addressed identifier (32-byte hash, hex on disk)
//! - [`normalize_created_at`] — Best-effort session timestamp recovery

pub mod error;
pub mod object;
pub mod timestamp;

pub use error::TypeError;
pub use object::ObjectId;
pub use timestamp::normalize_created_at;
