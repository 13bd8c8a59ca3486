//! GET /api/config

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Configuration as exposed to the dashboard frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub region: String,
    pub bucket: String,
    pub profile: String,
    pub stack_name: String,
    /// Always false: this backend proxies real cloud services; the
    /// frontend falls back to its own simulation only when unreachable.
    pub simulation: bool,
}

pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        region: state.config.region.clone(),
        bucket: state.config.bucket.clone(),
        profile: state.config.profile.clone(),
        stack_name: state.config.stack_name.clone(),
        simulation: false,
    })
}
