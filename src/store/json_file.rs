//! JSON-file implementation of [`MessageStore`].
//!
//! The message list lives in memory behind a [`tokio::sync::RwLock`]:
//! readers run concurrently, appends are exclusive.  Every append rewrites
//! the whole JSON array file while the write guard is still held so the
//! on-disk image never interleaves between appends.
//!
//! The file is a best-effort mirror.  A failed write is logged and the
//! append still succeeds from the in-memory copy, so a read-only filesystem
//! degrades the server to in-memory operation instead of taking it down.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{Message, MessageStore, NewMessage, StoreError, MAX_MESSAGES};

/// File-backed message store.
pub struct JsonFileStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

struct Inner {
    /// Newest first.
    messages: Vec<Message>,
    /// Last id handed out.  Appends bump past it so two requests landing in
    /// the same millisecond still get distinct ids.
    last_id: i64,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any previously persisted list.
    ///
    /// A missing file starts the store empty.  An unreadable or corrupt
    /// file is logged and treated as empty so the server still comes up.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_owned();
        let messages = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<Message>>(&bytes) {
                Ok(list) => list,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt message file; starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read message file; starting empty");
                Vec::new()
            }
        };
        info!(path = %path.display(), count = messages.len(), "message file loaded");

        let last_id = messages.iter().map(|m| m.id).max().unwrap_or(0);
        Ok(Self {
            path,
            inner: RwLock::new(Inner { messages, last_id }),
        })
    }

    /// Serialize `messages` and rewrite the backing file in place.
    async fn persist(&self, messages: &[Message]) {
        match serde_json::to_vec_pretty(messages) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.path, bytes).await {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "failed to persist message file; continuing from memory"
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize message list; continuing from memory");
            }
        }
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    async fn append(&self, draft: NewMessage) -> Result<Message, StoreError> {
        draft.check()?;

        let mut inner = self.inner.write().await;

        let now = Utc::now();
        // Millisecond clock as id, bumped past the previous one so ids stay
        // unique and monotonic under concurrent appends.
        let id = now.timestamp_millis().max(inner.last_id + 1);
        inner.last_id = id;

        let message = Message {
            id,
            name: draft.name,
            email: draft.email,
            content: draft.content,
            create_time: now,
        };

        inner.messages.insert(0, message.clone());
        inner.messages.truncate(MAX_MESSAGES);

        self.persist(&inner.messages).await;

        Ok(message)
    }

    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.inner.read().await.messages.clone())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
