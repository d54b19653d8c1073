//! Application state shared across handlers
//!
//! Everything here is constructed once at startup and injected; no
//! process-wide globals. All members are read-only after construction and
//! cheap to clone.

use std::sync::Arc;

use infrastructure::{AppConfig, BackendClient};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<AppConfig>,
    /// Client for outbound backend calls
    pub backend: Arc<BackendClient>,
}

impl AppState {
    /// Bundle the startup-constructed dependencies
    pub fn new(config: Arc<AppConfig>, backend: BackendClient) -> Self {
        Self {
            config,
            backend: Arc::new(backend),
        }
    }
}
