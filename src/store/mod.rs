//! Message store abstraction.
//!
//! [`MessageStore`] is the interface the HTTP layer programs against.  Two
//! implementations exist: [`json_file::JsonFileStore`] (in-memory list
//! mirrored to a JSON array file) and [`sqlite::SqliteStore`] (sqlx +
//! SQLite).  Which one backs the server is decided once at startup from
//! [`crate::config::Config::storage`]; handlers only ever see an
//! `Arc<dyn MessageStore>`.
//!
//! Field validation lives on [`NewMessage`] so both backends enforce the
//! same rules even when called without going through the HTTP layer.

pub mod json_file;
pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Upper bound on retained messages; the oldest beyond it are evicted on
/// every append.
pub const MAX_MESSAGES: usize = 100;

/// A stored guestbook entry.
///
/// `create_time` serializes under the wire name `createTime`, which is what
/// the resume frontend expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub content: String,
    #[serde(rename = "createTime")]
    pub create_time: DateTime<Utc>,
}

/// A visitor-submitted draft, validated before it becomes a [`Message`].
#[derive(Debug, Clone, Validate)]
pub struct NewMessage {
    #[validate(length(min = 1, max = 50, message = "name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 100, message = "email must be between 1 and 100 characters"),
        email(message = "email format is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 500, message = "content must be between 1 and 500 characters"))]
    pub content: String,
}

impl NewMessage {
    /// Build a draft from raw input, trimming surrounding whitespace so a
    /// field of only spaces counts as empty.
    pub fn new(name: impl Into<String>, email: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_owned(),
            email: email.into().trim().to_owned(),
            content: content.into().trim().to_owned(),
        }
    }

    /// Run the field rules, folding every violation into one message.
    pub(crate) fn check(&self) -> Result<(), StoreError> {
        self.validate()
            .map_err(|e| StoreError::Validation(flatten_errors(&e)))
    }
}

/// Collapse [`validator::ValidationErrors`] into a single semicolon-joined
/// string, sorted so the output is deterministic.
fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            match &err.message {
                Some(m) => parts.push(m.to_string()),
                None => parts.push(format!("{field} is invalid")),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}

/// Errors produced by a [`MessageStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The submitted draft failed a field rule.
    #[error("{0}")]
    Validation(String),

    /// The backing database rejected an operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The JSON file backing the store could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize the persisted message list.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Interface for persisting and listing guestbook messages.
///
/// Implement this trait to add another backend without touching any handler
/// code; the trait is object-safe so the backend is swappable by
/// configuration alone.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Validate `draft`, assign an id and the current timestamp, insert at
    /// the head of the list, evict entries beyond [`MAX_MESSAGES`], persist,
    /// and return the stored record.
    async fn append(&self, draft: NewMessage) -> Result<Message, StoreError>;

    /// All stored messages, newest first.  Empty when nothing has been
    /// submitted yet.
    async fn list(&self) -> Result<Vec<Message>, StoreError>;
}

// ── Tests ──────────────────────────────────────────────────────────────────────
