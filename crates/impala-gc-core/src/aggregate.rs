//! Aggregation of per-pool usage records into per-node totals.
//!
//! Collapses the arbitrary-length per-pool breakdown into a fixed-width
//! summary, so output cardinality stays bounded no matter how many memory
//! pools the remote JVM reports.

use crate::model::{GcMeasurement, GcTotals, PoolUsage};

/// Reduces a measurement to the fixed 9-value total set.
///
/// Each total is the sum of its field across all pools in the corresponding
/// list (an empty list sums to 0.0); `duration` passes through unchanged.
pub fn reduce(m: &GcMeasurement) -> GcTotals {
    let after = sum_pools(&m.usage_after_gc);
    let before = sum_pools(&m.usage_before_gc);
    GcTotals {
        total_commited_after_gc: after.committed,
        total_init_after_gc: after.init,
        total_used_after_gc: after.used,
        total_max_after_gc: after.max,
        total_commited_before_gc: before.committed,
        total_init_before_gc: before.init,
        total_used_before_gc: before.used,
        total_max_before_gc: before.max,
        duration: m.duration,
    }
}

fn sum_pools(pools: &[PoolUsage]) -> PoolUsage {
    pools.iter().fold(PoolUsage::default(), |acc, p| PoolUsage {
        used: acc.used + p.used,
        max: acc.max + p.max,
        committed: acc.committed + p.committed,
        init: acc.init + p.init,
    })
}
