//! Session directory handle: listing and reconstruction.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use weft_store::{SessionStore, SqliteSessionStore};
use weft_transcript::{decode_metadata, preview, reconstruct};
use weft_types::normalize_created_at;

use crate::error::{SdkError, SdkResult};
use crate::session::{SessionSummary, SessionTranscript};

/// File name of a session's backing database.
const STORE_FILE: &str = "store.db";

/// Name used when metadata carries none.
const UNTITLED: &str = "Untitled Session";

/// Handle over a directory whose children are session directories, each
/// holding one `store.db`.
///
/// Purely read-only and stateless across calls; every operation opens a
/// short-lived store handle and releases it on all exit paths.
#[derive(Clone, Debug)]
pub struct SessionDirectory {
    root: PathBuf,
}

impl SessionDirectory {
    /// Create a handle over a chats root directory.
    ///
    /// The directory is not required to exist; a missing root lists as
    /// empty rather than erroring.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every readable session, newest first.
    ///
    /// Cheap: no graph reconstruction. A session that cannot be read is
    /// skipped with a warning and never aborts the listing of its siblings.
    pub fn list_sessions(&self) -> SdkResult<Vec<SessionSummary>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "chats root does not exist");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut sessions = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let session_id = entry.file_name().to_string_lossy().into_owned();
            match self.summarize(&session_id) {
                Ok(summary) => sessions.push(summary),
                Err(err) => {
                    warn!(session = %session_id, %err, "skipping unreadable session");
                }
            }
        }

        // Newest first; sessions with no recoverable timestamp sort last.
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    /// Run the full reconstruction pipeline for one session.
    pub fn reconstruct(&self, session_id: &str) -> SdkResult<SessionTranscript> {
        let db_path = self.store_path(session_id);
        if !db_path.exists() {
            return Err(SdkError::SessionNotFound(session_id.to_string()));
        }

        let store = SqliteSessionStore::open(&db_path)?;
        let objects = store.objects()?;
        let messages = reconstruct(&objects);
        let metadata = decode_metadata(&store.metadata()?);

        Ok(SessionTranscript {
            id: session_id.to_string(),
            messages,
            metadata,
        })
    }

    /// Summarize one session without reconstructing it.
    pub fn summarize(&self, session_id: &str) -> SdkResult<SessionSummary> {
        let db_path = self.store_path(session_id);
        let store = SqliteSessionStore::open(&db_path)?;

        let metadata = decode_metadata(&store.metadata()?);
        let agent = metadata.get("agent");

        let name = agent
            .and_then(|a| a.get("name"))
            .and_then(Value::as_str)
            .or_else(|| metadata.get("name").and_then(Value::as_str))
            .unwrap_or(UNTITLED)
            .to_string();
        let mode = agent
            .and_then(|a| a.get("mode"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let agent_id = agent
            .and_then(|a| a.get("agentId"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let created_at = agent
            .and_then(|a| a.get("createdAt"))
            .and_then(normalize_created_at)
            .or_else(|| mtime(&db_path))
            .or_else(|| mtime(&self.root.join(session_id)));

        let message_count = store.message_count()?;
        let last_message_preview = store
            .last_message()?
            .and_then(|object| preview(&object.data));

        Ok(SessionSummary {
            id: session_id.to_string(),
            name,
            created_at,
            mode,
            agent_id,
            message_count,
            last_message_preview,
        })
    }

    fn store_path(&self, session_id: &str) -> PathBuf {
        self.root.join(session_id).join(STORE_FILE)
    }
}

fn mtime(path: &Path) -> Option<DateTime<Utc>> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified))
}
