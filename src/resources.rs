//! Resource-utilization simulator
//!
//! The demo has no live CloudWatch integration for instance metrics, so
//! `/api/resources` serves a synthetic scaling pattern: a deterministic
//! piecewise-linear instance ramp over a 15-minute window, with fresh
//! uniform noise on the utilization percentages. Purely a function of the
//! clock and a random source; nothing is persisted or seeded.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the simulated scaling window, in seconds.
pub const SCALING_WINDOW_SECS: f64 = 900.0;

/// Wire shape of `/api/resources`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSample {
    /// Minutes elapsed within the current 15-minute window
    pub time: f64,
    pub cpu_count: i64,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub gpu_utilization: f64,
}

/// Instance count at `minutes` into the window: ramp up to 20 in the first
/// minute, climb to the 160-instance plateau by minute 3, hold until
/// minute 8, then scale down. Values truncate to whole instances.
pub fn cpu_count_at(minutes: f64) -> i64 {
    let count = if minutes < 1.0 {
        minutes * 20.0
    } else if minutes < 3.0 {
        20.0 + (minutes - 1.0) * 70.0
    } else if minutes < 8.0 {
        160.0
    } else if minutes < 10.0 {
        160.0 - (minutes - 8.0) * 60.0
    } else {
        40.0 - (minutes.min(13.0) - 10.0) * 10.0
    };
    count as i64
}

/// Sample the simulator at `now_seconds` (a wall-clock Unix timestamp).
pub fn sample_at(now_seconds: f64) -> ResourceSample {
    let minutes = (now_seconds % SCALING_WINDOW_SECS) / 60.0;
    let mut rng = rand::rng();

    let gpu_utilization = if minutes < 10.0 {
        0.0
    } else {
        80.0 + rng.random_range(-5.0..15.0)
    };

    ResourceSample {
        time: minutes,
        cpu_count: cpu_count_at(minutes),
        cpu_utilization: 75.0 + rng.random_range(-5.0..15.0),
        memory_utilization: 60.0 + rng.random_range(-10.0..20.0),
        gpu_utilization,
    }
}
