//! Guestbook routes.
//!
//! `POST /api/resume/message` validates and stores a submission;
//! `GET /api/resume/message/list` returns everything, newest first.  Both
//! answer with the `{code, msg?, data?}` envelope the resume frontend
//! expects.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::{ApiResponse, MessageResponse, SubmitMessageRequest};
use crate::state::AppState;
use crate::store::NewMessage;

#[derive(OpenApi)]
#[openapi(
    paths(submit_message, list_messages),
    components(schemas(SubmitMessageRequest, MessageResponse))
)]
pub struct MessageApi;

/// Register guestbook routes; nested under `/api/resume/message`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(submit_message))
        .route("/list", get(list_messages))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Store a new guestbook entry.
#[utoipa::path(
    post,
    path = "/api/resume/message",
    tag = "message",
    request_body = SubmitMessageRequest,
    responses(
        (status = 200, description = "Message stored", body = Value),
        (status = 400, description = "A field is missing, blank, or over its length cap"),
        (status = 500, description = "The store could not persist the message"),
    )
)]
pub async fn submit_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitMessageRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ServerError> {
    let draft = NewMessage::new(req.name, req.email, req.content);
    let message = state.store.append(draft).await?;
    info!(id = message.id, "message saved");
    Ok(Json(ApiResponse::ok_with_msg("message saved", message.to_response())))
}

/// All guestbook entries, newest first.
#[utoipa::path(
    get,
    path = "/api/resume/message/list",
    tag = "message",
    responses(
        (status = 200, description = "Message list retrieved", body = Value),
        (status = 500, description = "The store could not be read"),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MessageResponse>>>, ServerError> {
    let messages = state.store.list().await?;
    Ok(Json(ApiResponse::ok(
        messages.iter().map(|m| m.to_response()).collect(),
    )))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{Config, StorageKind};
    use crate::store::json_file::JsonFileStore;

    fn test_config() -> Config {
        Config {
            bind_address: "127.0.0.1:0".into(),
            storage: StorageKind::File,
            data_file: "messages.json".into(),
            database_url: "sqlite://messages.db".into(),
            log_level: "info".into(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: false,
        }
    }

    async fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        let store = JsonFileStore::open(dir.path().join("messages.json"))
            .await
            .unwrap();
        Arc::new(AppState {
            config: Arc::new(test_config()),
            store: Arc::new(store),
        })
    }

    fn request(name: &str, email: &str, content: &str) -> SubmitMessageRequest {
        SubmitMessageRequest {
            name: name.into(),
            email: email.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn submitted_message_appears_first_in_list() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        submit_message(State(state.clone()), Json(request("Zhang", "z@x.com", "hi")))
            .await
            .unwrap();
        submit_message(State(state.clone()), Json(request("Li", "l@x.com", "hello")))
            .await
            .unwrap();

        let Json(body) = list_messages(State(state)).await.unwrap();
        assert_eq!(body.code, 200);
        let listed = body.data.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Li");
        assert_eq!(listed[1].name, "Zhang");
    }

    #[tokio::test]
    async fn blank_field_is_rejected_and_list_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let result =
            submit_message(State(state.clone()), Json(request("Zhang", "z@x.com", "   "))).await;
        assert!(result.is_err());

        let Json(body) = list_messages(State(state)).await.unwrap();
        assert!(body.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_envelope_carries_msg_and_data() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir).await;

        let Json(body) =
            submit_message(State(state), Json(request("Zhang", "z@x.com", "hi")))
                .await
                .unwrap();
        assert_eq!(body.code, 200);
        assert_eq!(body.msg.as_deref(), Some("message saved"));
        assert_eq!(body.data.unwrap().name, "Zhang");
    }
}
