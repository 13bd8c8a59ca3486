//! Application state shared across request handlers

use crate::cloud::CloudProvider;
use crate::config::DashboardConfig;
use std::sync::Arc;

/// Shared, read-only state cloned into every handler. Configuration is
/// loaded once at process start; there is no cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub cloud: Arc<dyn CloudProvider>,
}

impl AppState {
    pub fn new(config: DashboardConfig, cloud: Arc<dyn CloudProvider>) -> Self {
        Self {
            config: Arc::new(config),
            cloud,
        }
    }
}
