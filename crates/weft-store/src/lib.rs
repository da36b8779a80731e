//! Read-only access to content-addressed session object stores.
//!
//! A session store is an append-only collection of immutable records, each
//! keyed by a 32-byte content hash and holding a raw byte payload. The
//! producing system writes two kinds of payload into the same store:
//!
//! - [`ObjectKind::Message`] -- JSON conversation records (payload starts
//!   with `{`)
//! - [`ObjectKind::Structural`] -- opaque binary records that encode graph
//!   edges between objects
//!
//! This crate never writes to a production store. The SQLite backend opens
//! `store.db` read-only; the in-memory backend exists for tests and
//! embedding and content-addresses its own writes.
//!
//! # Design Rules
//!
//! 1. Objects are immutable and enumerate in their natural storage order.
//! 2. The store never interprets structural payloads -- classification stops
//!    at the leading byte.
//! 3. A malformed row degrades that row, never the enumeration.
//! 4. Store handles are short-lived; dropping the handle releases the
//!    underlying connection on every exit path.

pub mod error;
pub mod memory;
pub mod object;
pub mod sqlite;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemorySessionStore;
pub use object::{ObjectKind, StoredObject, MESSAGE_MARKER};
pub use sqlite::SqliteSessionStore;
pub use traits::{MetaEntry, SessionStore};
