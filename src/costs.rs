//! Illustrative cost comparison model
//!
//! Backs the `cost-report` tool: a deliberately simple model contrasting a
//! spot-priced cloud batch run against an amortized on-premises cluster.
//! The constants are illustrative demo figures, not a cost-accounting
//! engine.

use serde::Serialize;

/// Hourly price of one cloud compute instance, on demand (USD).
pub const ON_DEMAND_HOURLY: f64 = 0.68;
/// Typical spot discount applied to the on-demand price.
pub const SPOT_DISCOUNT: f64 = 0.70;
/// Instance-minutes of compute consumed per sample.
pub const INSTANCE_MINUTES_PER_SAMPLE: f64 = 12.0;
/// Flat per-run cost of storage and requests (USD).
pub const CLOUD_OVERHEAD: f64 = 1.50;

/// Purchase price of the on-prem cluster (USD).
pub const ONPREM_CLUSTER_PRICE: f64 = 180_000.0;
/// Amortization horizon in years.
pub const ONPREM_AMORTIZATION_YEARS: f64 = 3.0;
/// Power, cooling, and admin as a yearly fraction of purchase price.
pub const ONPREM_YEARLY_OVERHEAD: f64 = 0.25;
/// Runs the cluster can complete per year at the demo's workload size.
pub const ONPREM_RUNS_PER_YEAR: f64 = 2_000.0;

/// One row of the comparison table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRow {
    pub samples: u32,
    pub cloud_on_demand: f64,
    pub cloud_spot: f64,
    pub on_prem: f64,
}

/// Cloud cost of processing `samples` at the given hourly instance price.
fn cloud_run_cost(samples: u32, hourly: f64) -> f64 {
    let instance_hours = samples as f64 * INSTANCE_MINUTES_PER_SAMPLE / 60.0;
    instance_hours * hourly + CLOUD_OVERHEAD
}

/// Per-run share of the amortized on-prem cluster. Independent of the
/// sample count: the cluster costs the same whether it is busy or idle.
pub fn onprem_run_cost() -> f64 {
    let yearly = ONPREM_CLUSTER_PRICE / ONPREM_AMORTIZATION_YEARS
        + ONPREM_CLUSTER_PRICE * ONPREM_YEARLY_OVERHEAD;
    yearly / ONPREM_RUNS_PER_YEAR
}

/// Build one comparison row for a sample count.
pub fn compare(samples: u32) -> CostRow {
    CostRow {
        samples,
        cloud_on_demand: cloud_run_cost(samples, ON_DEMAND_HOURLY),
        cloud_spot: cloud_run_cost(samples, ON_DEMAND_HOURLY * (1.0 - SPOT_DISCOUNT)),
        on_prem: onprem_run_cost(),
    }
}

/// Comparison rows for a set of sample counts.
pub fn comparison_table(sample_counts: &[u32]) -> Vec<CostRow> {
    sample_counts.iter().map(|&n| compare(n)).collect()
}
