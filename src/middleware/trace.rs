use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::state::AppState;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Wraps every request in a span carrying a trace id.
///
/// The id is taken from the `x-trace-id` request header when present and
/// valid, generated otherwise, and echoed back on the response so a client
/// report can be matched to the server logs.
pub async fn trace_middleware(
    State(_state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    // A hyphenated UUID is always a valid header value.
    let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

    async move {
        info!("request started");

        if let Some(value) = &header_value {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let mut response = next.run(req).await;

        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "request finished"
        );
        response
    }
    .instrument(span)
    .await
}
