use std::sync::Arc;

use pressline_export::styles::DocumentStyles;

use crate::config::ServiceConfig;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Read-only after startup; every request renders into its own buffers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub styles: Arc<DocumentStyles>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
            styles: Arc::new(DocumentStyles::default()),
        }
    }
}
