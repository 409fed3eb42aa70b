// Application state
// Read-only per process: every request rebuilds its data from disk

use crate::config::{Config, ContractsConfig};
use std::sync::Arc;

/// State shared with every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where contracts live and which columns to read
    pub contracts: ContractsConfig,
}

/// Shared handle passed to axum handlers
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create state for a contract configuration
    pub fn new(contracts: ContractsConfig) -> Self {
        Self { contracts }
    }

    /// Create state from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.contracts.clone())
    }

    /// Wrap the state for use with `Router::with_state`
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
