//! Cloud service abstraction
//!
//! The dashboard talks to three managed services: the Batch job queue, the
//! CloudWatch metrics service, and the S3 object store. Each is reached
//! through a narrow trait so the route handlers never touch SDK types and
//! the test suite can substitute an in-memory provider.
//!
//! Construction failures surface as [`CloudError::Unavailable`] rather than
//! panics; the route layer turns them into 500 responses.

pub mod aws;
pub mod mock;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use aws::AwsCloud;
pub use mock::MockCloud;

#[derive(Error, Debug)]
pub enum CloudError {
    /// Client handle could not be constructed for this service
    #[error("{service} client not available: {reason}")]
    Unavailable { service: &'static str, reason: String },

    /// The service answered with an error
    #[error("{service} call failed: {reason}")]
    Api { service: &'static str, reason: String },
}

pub type CloudResult<T> = Result<T, CloudError>;

/// Job lifecycle states the status aggregator queries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Succeeded,
    Failed,
}

/// Parameters for a Batch job submission.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub name: String,
    pub queue: String,
    pub definition: String,
    /// Environment variables passed to the container
    pub environment: Vec<(String, String)>,
}

/// Batch queue service: queue describe, per-state job listing, submission.
#[async_trait]
pub trait BatchQueue: Send + Sync {
    /// Whether the named job queue exists.
    async fn queue_exists(&self, queue: &str) -> CloudResult<bool>;

    /// Number of jobs currently in `state` on the queue.
    async fn count_jobs(&self, queue: &str, state: JobState) -> CloudResult<usize>;

    /// Whether the named job definition has an ACTIVE revision.
    async fn definition_active(&self, definition: &str) -> CloudResult<bool>;

    /// Submit a job; returns the service-assigned job id.
    async fn submit_job(&self, spec: &JobSpec) -> CloudResult<String>;
}

/// Metrics service. Cost accounting is an explicit stub in this version:
/// the call is still made so its failure is observed and logged, but the
/// returned value is always 0.0.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn accrued_cost(&self, stack_name: &str) -> CloudResult<f64>;
}

/// Object store service: get-object by bucket/key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> CloudResult<Vec<u8>>;
}

/// Factory for the three service handles. Each accessor may fail
/// independently; a failure means that service is unavailable for this
/// request, not that the process is broken.
pub trait CloudProvider: Send + Sync {
    fn batch(&self) -> CloudResult<Arc<dyn BatchQueue>>;
    fn metrics(&self) -> CloudResult<Arc<dyn MetricsSource>>;
    fn object_store(&self) -> CloudResult<Arc<dyn ObjectStore>>;
}
