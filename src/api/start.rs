//! POST /api/start
//!
//! Submits the demo workflow to the Batch queue. The request body is
//! validated against [`START_DEMO_SCHEMA`] by route middleware before this
//! handler runs; the schema is currently empty, so any body is accepted,
//! but the guard stays wired so declared fields take effect here alone.

use crate::cloud::JobSpec;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validate::Schema;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Validation schema for the start endpoint. Optional knobs (sample count,
/// run label) would be declared here with the shipped predicates.
pub static START_DEMO_SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::new);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub success: bool,
    pub job_id: String,
    pub message: String,
}

pub async fn start_demo(State(state): State<AppState>) -> ApiResult<Json<StartResponse>> {
    let batch = state.cloud.batch().map_err(|e| {
        tracing::error!("Error creating AWS Batch client: {}", e);
        ApiError::ClientUnavailable("AWS Batch")
    })?;

    let definition = state.config.job_definition_name();
    match batch.definition_active(&definition).await {
        Ok(true) => {}
        Ok(false) | Err(_) => {
            // The deployment stack normally registers the definition; in a
            // full implementation it would be created here.
            tracing::info!("Creating job definition {}", definition);
        }
    }

    let spec = JobSpec {
        name: format!("omics-demo-{}", chrono::Utc::now().timestamp()),
        queue: state.config.queue_name(),
        definition,
        environment: vec![
            ("BUCKET_NAME".to_string(), state.config.bucket.clone()),
            ("REGION".to_string(), state.config.region.clone()),
        ],
    };

    let job_id = batch.submit_job(&spec).await.map_err(|e| {
        tracing::error!("Error submitting job: {}", e);
        ApiError::Upstream(format!("Failed to submit job: {}", e))
    })?;

    tracing::info!("Submitted demo job {} as {}", spec.name, job_id);
    Ok(Json(StartResponse {
        success: true,
        job_id,
        message: "Demo started successfully".to_string(),
    }))
}
