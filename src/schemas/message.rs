use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Message;

/// JSON envelope every endpoint responds with: `{code, msg?, data?}`.
///
/// `code` mirrors the HTTP status so clients that only read the body agree
/// with clients that only read the status line.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { code: 200, msg: None, data: Some(data) }
    }

    pub fn ok_with_msg(msg: impl Into<String>, data: T) -> Self {
        Self { code: 200, msg: Some(msg.into()), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn error(code: u16, msg: impl Into<String>) -> Self {
        Self { code, msg: Some(msg.into()), data: None }
    }
}

/// Body of `POST /api/resume/message`.
///
/// Fields default to empty strings so an incomplete body reaches validation
/// (and comes back as a 400) instead of dying in the extractor.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub content: String,
}

/// A guestbook entry as rendered on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub content: String,
    #[serde(rename = "createTime")]
    pub create_time: String,
}

impl Message {
    pub fn to_response(&self) -> MessageResponse {
        MessageResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            content: self.content.clone(),
            create_time: self.create_time.to_rfc3339(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
