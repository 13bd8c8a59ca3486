//! GET /api/resources
//!
//! Serves the synthetic utilization sample. A real deployment would query
//! CloudWatch for instance metrics here; the client-availability check is
//! kept so the endpoint fails the same way the real integration would.

use crate::error::{ApiError, ApiResult};
use crate::resources::{sample_at, ResourceSample};
use crate::state::AppState;
use axum::{extract::State, Json};
use std::time::{SystemTime, UNIX_EPOCH};

pub async fn get_resources(State(state): State<AppState>) -> ApiResult<Json<ResourceSample>> {
    if let Err(e) = state.cloud.metrics() {
        tracing::error!("Error creating CloudWatch client: {}", e);
        return Err(ApiError::ClientUnavailable("CloudWatch"));
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Ok(Json(sample_at(now)))
}
