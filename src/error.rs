//! Error types for the API layer
//!
//! Every failure is caught at the route boundary and mapped to a JSON
//! `{"error": message}` body. Full diagnostic detail stays in the server
//! logs; client-visible messages are sanitized except for validation
//! errors, which echo the offending field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream service handle could not be built (bad credentials/region)
    #[error("{0} client not available")]
    ClientUnavailable(&'static str),

    /// Malformed request body; recovered before the handler runs
    #[error("{0}")]
    Validation(String),

    /// Upstream call failed with a recognized, reportable reason
    #[error("{0}")]
    Upstream(String),

    /// Anything unexpected; the detail is logged, the client sees a stock message
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ClientUnavailable(_) | ApiError::Upstream(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if let ApiError::Internal(err) = &self {
            tracing::error!("Unhandled error in request: {:#}", err);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
