use std::sync::Arc;

use crate::config::Config;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store chosen at startup from `STORE_BACKEND`.
    pub store: Arc<dyn ResumeStore>,
    pub config: Config,
}
