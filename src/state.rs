//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::store::MessageStore;

/// State shared across all HTTP handlers.
///
/// Constructed once in `main` and cloned into each handler, so the store's
/// synchronization is the only shared-mutable surface in the process.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// The message store behind the HTTP surface.
    pub store: Arc<dyn MessageStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
