//! Demo status aggregation
//!
//! Reduces a snapshot of the Batch job queue (running/succeeded/failed
//! counts) into one dashboard status. The precedence ordering is a
//! deliberate business rule: running jobs always win, a failure is only
//! terminal when nothing succeeded, and any success otherwise reports the
//! demo as completed.

use serde::{Deserialize, Serialize};

/// Fixed demo dataset size shown on the dashboard.
pub const TOTAL_SAMPLES: u32 = 100;

/// Best-effort composite read of the job queue. The three counts come from
/// three sequential list calls, so they may describe slightly different
/// moments; callers accept torn snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobQueueSnapshot {
    pub running: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemoStatus {
    Ready,
    Running,
    Completed,
    Failed,
    NotFound,
    Error,
}

/// Wire shape of `/api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: DemoStatus,
    pub message: String,
    pub completed_samples: usize,
    pub total_samples: u32,
    pub cost_accrued: f64,
}

impl StatusReport {
    fn new(status: DemoStatus, message: String, completed_samples: usize) -> Self {
        Self {
            status,
            message,
            completed_samples,
            total_samples: TOTAL_SAMPLES,
            cost_accrued: 0.0,
        }
    }

    /// Report for a queue that does not exist (404).
    pub fn not_found() -> Self {
        Self::new(DemoStatus::NotFound, "Job queue not found".to_string(), 0)
    }

    /// Report for a request-level failure (500).
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DemoStatus::Error, message.into(), 0)
    }

    pub fn with_cost(mut self, cost_accrued: f64) -> Self {
        self.cost_accrued = cost_accrued;
        self
    }
}

/// Reduce a queue snapshot to a status report. First matching rule wins:
///
/// 1. any running jobs -> RUNNING
/// 2. failures with zero successes -> FAILED
/// 3. any successes -> COMPLETED (even alongside failures; partial
///    failures are reported as completed, a documented asymmetry)
/// 4. nothing at all -> READY
pub fn aggregate(snapshot: &JobQueueSnapshot) -> StatusReport {
    if snapshot.running > 0 {
        StatusReport::new(
            DemoStatus::Running,
            format!("Processing samples... ({} jobs running)", snapshot.running),
            snapshot.succeeded,
        )
    } else if snapshot.failed > 0 && snapshot.succeeded == 0 {
        StatusReport::new(
            DemoStatus::Failed,
            format!("Demo failed with {} failed jobs", snapshot.failed),
            snapshot.succeeded,
        )
    } else if snapshot.succeeded > 0 {
        StatusReport::new(
            DemoStatus::Completed,
            format!(
                "Analysis completed with {} successful jobs",
                snapshot.succeeded
            ),
            snapshot.succeeded,
        )
    } else {
        StatusReport::new(DemoStatus::Ready, "Demo ready to start".to_string(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(running: usize, succeeded: usize, failed: usize) -> JobQueueSnapshot {
        JobQueueSnapshot {
            running,
            succeeded,
            failed,
        }
    }

    #[test]
    fn running_jobs_win_over_everything() {
        let report = aggregate(&snapshot(2, 5, 0));
        assert_eq!(report.status, DemoStatus::Running);
        assert_eq!(report.completed_samples, 5);
        assert!(report.message.contains("2 jobs running"));
    }

    #[test]
    fn running_wins_even_with_failures() {
        let report = aggregate(&snapshot(1, 0, 7));
        assert_eq!(report.status, DemoStatus::Running);
        assert_eq!(report.completed_samples, 0);
    }

    #[test]
    fn all_failed_reports_failed() {
        let report = aggregate(&snapshot(0, 0, 3));
        assert_eq!(report.status, DemoStatus::Failed);
        assert_eq!(report.completed_samples, 0);
        assert!(report.message.contains("3 failed jobs"));
    }

    // Known asymmetry: with successes and failures both present (and
    // nothing running), the demo reports COMPLETED. Partial failures are
    // masked on the dashboard; this pins the documented behavior.
    #[test]
    fn partial_failures_still_report_completed() {
        let report = aggregate(&snapshot(0, 5, 3));
        assert_eq!(report.status, DemoStatus::Completed);
        assert_eq!(report.completed_samples, 5);
        assert!(report.message.contains("5 successful jobs"));
    }

    #[test]
    fn empty_queue_is_ready() {
        let report = aggregate(&snapshot(0, 0, 0));
        assert_eq!(report.status, DemoStatus::Ready);
        assert_eq!(report.completed_samples, 0);
        assert_eq!(report.message, "Demo ready to start");
    }

    #[test]
    fn total_samples_is_fixed() {
        for snap in [snapshot(0, 0, 0), snapshot(3, 90, 7)] {
            assert_eq!(aggregate(&snap).total_samples, TOTAL_SAMPLES);
        }
    }

    #[test]
    fn cost_is_stubbed_at_zero() {
        assert_eq!(aggregate(&snapshot(1, 2, 3)).cost_accrued, 0.0);
    }

    #[test]
    fn status_serializes_screaming_case() {
        let report = aggregate(&snapshot(0, 0, 0));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "READY");
        assert_eq!(value["completedSamples"], 0);
        assert_eq!(value["totalSamples"], 100);

        let not_found = serde_json::to_value(StatusReport::not_found()).unwrap();
        assert_eq!(not_found["status"], "NOT_FOUND");
    }
}
