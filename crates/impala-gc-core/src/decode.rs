//! Structural extraction of GC measurements from untyped bean JSON.
//!
//! The management interface omits or reshapes fields depending on runtime
//! state — `LastGcInfo` is absent before the JVM's first collection, for
//! instance — so every field is decoded independently: a missing or
//! wrong-shaped field yields its default (0.0 for numbers, an empty list
//! for pool sequences) without aborting decoding of its siblings.

use serde_json::Value;

use crate::model::{GcMeasurement, PoolUsage};

/// Field of the GC bean holding the last-collection report.
const LAST_GC_INFO: &str = "LastGcInfo";

/// Decodes a GC bean into a [`GcMeasurement`].
///
/// Total over arbitrary JSON input: this never fails, it only defaults.
pub fn gc_measurement(bean: &Value) -> GcMeasurement {
    let info = bean.get(LAST_GC_INFO);
    GcMeasurement {
        duration: num_field(info, "duration"),
        usage_after_gc: pool_usages(info, "MemoryUsageAfterGc"),
        usage_before_gc: pool_usages(info, "MemoryUsageBeforeGc"),
    }
}

/// Numeric field accessor. Missing parents, missing keys, and non-numeric
/// values all decode to 0.0; integers and floats are both accepted.
fn num_field(obj: Option<&Value>, key: &str) -> f64 {
    obj.and_then(|v| v.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Decodes a `[{key, value}, ...]` pool-usage list.
///
/// The `key` (pool name) is not needed for aggregation. An entry whose
/// `value` is malformed contributes an all-zero usage record; a field list
/// that is not an array decodes to an empty list.
fn pool_usages(info: Option<&Value>, key: &str) -> Vec<PoolUsage> {
    let Some(entries) = info.and_then(|v| v.get(key)).and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| {
            let value = entry.get("value");
            PoolUsage {
                used: num_field(value, "used"),
                max: num_field(value, "max"),
                committed: num_field(value, "committed"),
                init: num_field(value, "init"),
            }
        })
        .collect()
}
