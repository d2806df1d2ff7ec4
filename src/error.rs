//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a `{code, msg}` envelope with a matching HTTP status code.
//!
//! Internal error text is returned to the caller verbatim in `msg`.  The
//! resume frontend surfaces it as a debug aid; see DESIGN.md before
//! tightening this.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::schemas::ApiResponse;
use crate::store::StoreError;

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("{0}")]
    Validation(String),

    /// Propagated from the message store.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ServerError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),

            // Validation failures surfaced by the store are still the
            // caller's fault.
            ServerError::Storage(StoreError::Validation(m)) => {
                (StatusCode::BAD_REQUEST, m.clone())
            }

            ServerError::Storage(e) => {
                error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }

            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, m.clone())
            }
        };
        let body = ApiResponse::error(status.as_u16(), msg);
        (status, Json(body)).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
