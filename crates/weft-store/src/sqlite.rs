//! SQLite-backed session store.
//!
//! The producing system writes each session to a `store.db` with two tables:
//! `blobs(rowid, id, data)` holding the content-addressed objects in
//! insertion order, and `meta(key, value)` holding the session's key/value
//! metadata. This backend opens the database read-only and never holds the
//! connection longer than the reconstruction that needed it.

use std::path::{Path, PathBuf};

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OpenFlags};
use tracing::warn;
use weft_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{StoredObject, MESSAGE_MARKER};
use crate::traits::{MetaEntry, SessionStore};

/// Read-only handle over one session's `store.db`.
pub struct SqliteSessionStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteSessionStore {
    /// Open a session store read-only.
    ///
    /// Fails with [`StoreError::Open`] when the file is missing, so callers
    /// can distinguish an absent session from a corrupt one.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::Open(format!(
                "no store database at {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Coerce any SQLite value to bytes.
///
/// Producers are inconsistent about TEXT vs BLOB affinity for both payloads
/// and metadata values; the engine treats everything as bytes.
fn value_bytes(value: SqlValue) -> Vec<u8> {
    match value {
        SqlValue::Blob(b) => b,
        SqlValue::Text(s) => s.into_bytes(),
        SqlValue::Integer(i) => i.to_string().into_bytes(),
        SqlValue::Real(f) => f.to_string().into_bytes(),
        SqlValue::Null => Vec::new(),
    }
}

impl SessionStore for SqliteSessionStore {
    fn objects(&self) -> StoreResult<Vec<StoredObject>> {
        let mut stmt = self
            .conn
            .prepare("SELECT rowid, id, data FROM blobs ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            let rowid: i64 = row.get(0)?;
            let id: String = row.get(1)?;
            let data: SqlValue = row.get(2)?;
            Ok((rowid, id, value_bytes(data)))
        })?;

        let mut objects = Vec::new();
        for row in rows {
            let (rowid, id, data) = row?;
            match ObjectId::from_hex(&id) {
                Ok(id) => objects.push(StoredObject::new(id, rowid as u64, data)),
                // A row the engine cannot address cannot participate in the
                // graph; skip it rather than failing the enumeration.
                Err(err) => warn!(rowid, %err, "skipping blob with malformed id"),
            }
        }
        Ok(objects)
    }

    fn metadata(&self) -> StoreResult<Vec<MetaEntry>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM meta")?;
        let rows = stmt.query_map([], |row| {
            let key: String = row.get(0)?;
            let value: SqlValue = row.get(1)?;
            Ok(MetaEntry {
                key,
                value: value_bytes(value),
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn message_count(&self) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM blobs WHERE substr(data, 1, 1) = ?1",
            rusqlite::params![vec![MESSAGE_MARKER]],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn last_message(&self) -> StoreResult<Option<StoredObject>> {
        let mut stmt = self.conn.prepare(
            "SELECT rowid, id, data FROM blobs \
             WHERE substr(data, 1, 1) = ?1 \
             ORDER BY rowid DESC LIMIT 1",
        )?;
        let mut rows = stmt.query_map(rusqlite::params![vec![MESSAGE_MARKER]], |row| {
            let rowid: i64 = row.get(0)?;
            let id: String = row.get(1)?;
            let data: SqlValue = row.get(2)?;
            Ok((rowid, id, value_bytes(data)))
        })?;

        match rows.next().transpose()? {
            Some((rowid, id, data)) => match ObjectId::from_hex(&id) {
                Ok(id) => Ok(Some(StoredObject::new(id, rowid as u64, data))),
                Err(err) => {
                    warn!(rowid, %err, "last message blob has malformed id");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for SqliteSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSessionStore")
            .field("path", &self.path)
            .finish()
    }
}
