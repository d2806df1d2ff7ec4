//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI endpoint (disable with `BOARD_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - Guestbook routes under `/api/resume/message`

pub mod doc;
mod health;
mod message;

use std::sync::Arc;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .merge(health::router())
        .nest("/api/resume/message", message::router());

    let mut app = Router::new().merge(api_router);

    // Enabled by default; disable with BOARD_ENABLE_SWAGGER=false in
    // production to avoid exposing the API structure.
    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, StorageKind};
    use crate::store::json_file::JsonFileStore;

    async fn test_app(dir: &tempfile::TempDir) -> Router {
        let config = Config {
            bind_address: "127.0.0.1:0".into(),
            storage: StorageKind::File,
            data_file: "messages.json".into(),
            database_url: "sqlite://messages.db".into(),
            log_level: "info".into(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: false,
        };
        let store = JsonFileStore::open(dir.path().join("messages.json"))
            .await
            .unwrap();
        build(Arc::new(AppState {
            config: Arc::new(config),
            store: Arc::new(store),
        }))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/resume/message")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn post_then_list_round_trips_through_the_router() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .clone()
            .oneshot(post_json(r#"{"name":"Zhang","email":"z@x.com","content":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["code"], 200);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/resume/message/list")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"][0]["name"], "Zhang");
    }

    #[tokio::test]
    async fn blank_field_yields_400_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .oneshot(post_json(r#"{"name":"","email":"z@x.com","content":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert!(body["msg"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn missing_field_yields_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .oneshot(post_json(r#"{"name":"Zhang"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_yields_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app.oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_method_yields_405() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/resume/message/list")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn preflight_is_answered_with_cors_headers_and_no_body() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/resume/message")
                    .header(header::ORIGIN, "http://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn trace_id_is_echoed_on_the_response() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-trace-id"));
    }
}
