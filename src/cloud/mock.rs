//! In-memory cloud provider for the test suite
//!
//! Scriptable stand-in for the AWS services: job counts, queue presence,
//! stored objects, and per-service availability are all configurable, so
//! router-level tests can exercise every error path without network access.

use super::{
    BatchQueue, CloudError, CloudProvider, CloudResult, JobSpec, JobState, MetricsSource,
    ObjectStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scriptable cloud provider. Clones share state, so a test can keep a
/// handle and inspect submissions after driving the router.
#[derive(Clone, Default)]
pub struct MockCloud {
    inner: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    batch_disabled: Mutex<bool>,
    metrics_disabled: Mutex<bool>,
    store_disabled: Mutex<bool>,
    queue_missing: Mutex<bool>,
    queue_query_fails: Mutex<bool>,
    count_query_fails: Mutex<bool>,
    counts: Mutex<(usize, usize, usize)>,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    submitted: Mutex<Vec<JobSpec>>,
}

impl MockCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the (running, succeeded, failed) job counts the queue reports.
    pub fn with_counts(self, running: usize, succeeded: usize, failed: usize) -> Self {
        *self.inner.counts.lock().unwrap() = (running, succeeded, failed);
        self
    }

    /// Make the queue-describe call report no queue.
    pub fn without_queue(self) -> Self {
        *self.inner.queue_missing.lock().unwrap() = true;
        self
    }

    /// Make the queue-describe call itself fail.
    pub fn with_failing_queue_query(self) -> Self {
        *self.inner.queue_query_fails.lock().unwrap() = true;
        self
    }

    /// Make the per-state job-count calls fail.
    pub fn with_failing_count_query(self) -> Self {
        *self.inner.count_query_fails.lock().unwrap() = true;
        self
    }

    /// Make the batch client factory fail.
    pub fn without_batch(self) -> Self {
        *self.inner.batch_disabled.lock().unwrap() = true;
        self
    }

    /// Make the metrics client factory fail.
    pub fn without_metrics(self) -> Self {
        *self.inner.metrics_disabled.lock().unwrap() = true;
        self
    }

    /// Make the object-store client factory fail.
    pub fn without_object_store(self) -> Self {
        *self.inner.store_disabled.lock().unwrap() = true;
        self
    }

    /// Store an object served by `get_object`.
    pub fn with_object(self, bucket: &str, key: &str, data: &[u8]) -> Self {
        self.inner
            .objects
            .lock()
            .unwrap()
            .insert(format!("{}/{}", bucket, key), data.to_vec());
        self
    }

    /// Jobs submitted through the mock batch client, in order.
    pub fn submitted_jobs(&self) -> Vec<JobSpec> {
        self.inner.submitted.lock().unwrap().clone()
    }
}

impl CloudProvider for MockCloud {
    fn batch(&self) -> CloudResult<Arc<dyn BatchQueue>> {
        if *self.inner.batch_disabled.lock().unwrap() {
            return Err(CloudError::Unavailable {
                service: "AWS Batch",
                reason: "mock batch disabled".to_string(),
            });
        }
        Ok(Arc::new(MockBatch {
            state: self.inner.clone(),
        }))
    }

    fn metrics(&self) -> CloudResult<Arc<dyn MetricsSource>> {
        if *self.inner.metrics_disabled.lock().unwrap() {
            return Err(CloudError::Unavailable {
                service: "CloudWatch",
                reason: "mock metrics disabled".to_string(),
            });
        }
        Ok(Arc::new(MockMetrics))
    }

    fn object_store(&self) -> CloudResult<Arc<dyn ObjectStore>> {
        if *self.inner.store_disabled.lock().unwrap() {
            return Err(CloudError::Unavailable {
                service: "S3",
                reason: "mock store disabled".to_string(),
            });
        }
        Ok(Arc::new(MockStore {
            state: self.inner.clone(),
        }))
    }
}

struct MockBatch {
    state: Arc<MockState>,
}

#[async_trait]
impl BatchQueue for MockBatch {
    async fn queue_exists(&self, _queue: &str) -> CloudResult<bool> {
        if *self.state.queue_query_fails.lock().unwrap() {
            return Err(CloudError::Api {
                service: "AWS Batch",
                reason: "describe_job_queues failed".to_string(),
            });
        }
        Ok(!*self.state.queue_missing.lock().unwrap())
    }

    async fn count_jobs(&self, _queue: &str, state: JobState) -> CloudResult<usize> {
        if *self.state.count_query_fails.lock().unwrap() {
            return Err(CloudError::Api {
                service: "AWS Batch",
                reason: "list_jobs failed".to_string(),
            });
        }
        let (running, succeeded, failed) = *self.state.counts.lock().unwrap();
        Ok(match state {
            JobState::Running => running,
            JobState::Succeeded => succeeded,
            JobState::Failed => failed,
        })
    }

    async fn definition_active(&self, _definition: &str) -> CloudResult<bool> {
        Ok(true)
    }

    async fn submit_job(&self, spec: &JobSpec) -> CloudResult<String> {
        let mut submitted = self.state.submitted.lock().unwrap();
        submitted.push(spec.clone());
        Ok(format!("mock-job-{}", submitted.len()))
    }
}

struct MockMetrics;

#[async_trait]
impl MetricsSource for MockMetrics {
    async fn accrued_cost(&self, _stack_name: &str) -> CloudResult<f64> {
        Ok(0.0)
    }
}

struct MockStore {
    state: Arc<MockState>,
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn get_object(&self, bucket: &str, key: &str) -> CloudResult<Vec<u8>> {
        self.state
            .objects
            .lock()
            .unwrap()
            .get(&format!("{}/{}", bucket, key))
            .cloned()
            .ok_or_else(|| CloudError::Api {
                service: "S3",
                reason: format!("NoSuchKey: {}/{}", bucket, key),
            })
    }
}
