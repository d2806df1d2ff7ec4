use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the CORS layer.
///
/// Wildcard by default so the resume frontend can be served from anywhere;
/// set `BOARD_CORS_ORIGINS` to a comma-separated origin list in production.
/// Preflight `OPTIONS` requests are answered by this layer with no body.
pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    if let Some(origins_str) = &state.config.cors_allowed_origins {
        let origins: Vec<axum::http::HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        if !origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(origins)
                .allow_headers(Any)
                .allow_methods(Any);
        }
    }
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
}
