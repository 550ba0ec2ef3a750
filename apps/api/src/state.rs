use crate::config::Config;
use crate::document::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every live editing session and its document.
    pub sessions: SessionStore,
    /// Shared HTTP client for the fire-and-forget export hand-off.
    pub http: reqwest::Client,
    pub config: Config,
}
