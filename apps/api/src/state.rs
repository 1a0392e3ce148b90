use std::sync::Arc;

use crate::gemini::GeminiClient;
use crate::tracker::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gemini: GeminiClient,
    /// Pluggable job application store. Default: InMemoryJobStore.
    pub jobs: Arc<dyn JobStore>,
}
