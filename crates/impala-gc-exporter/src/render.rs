//! Prometheus text rendering of a scrape snapshot.
//!
//! A fresh registry is built per pull: one gauge family per metric name,
//! one `ip`-labeled sample per node that succeeded. No long-lived gauges
//! and no re-registration across pulls; a node that failed this cycle
//! simply has no series rather than reporting zeros.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use impala_gc_core::model::{METRIC_NAMES, ScrapeSnapshot};

/// Metric namespace; full names read `impala_jmx_<metric>`.
const NAMESPACE: &str = "impala";
const SUBSYSTEM: &str = "jmx";

/// Constant label applied to every exported series.
const CLUSTER: &str = "impala";

/// Renders a snapshot in Prometheus text exposition format.
pub(crate) fn snapshot(snapshot: &ScrapeSnapshot) -> Result<String, prometheus::Error> {
    // No node succeeded this cycle: an empty exposition body, not an error.
    // The text encoder rejects registered families that hold no samples.
    if snapshot.results.is_empty() {
        return Ok(String::new());
    }

    let registry = Registry::new();

    for name in METRIC_NAMES {
        let opts = Opts::new(name, format!("JMX metric {}", name))
            .namespace(NAMESPACE)
            .subsystem(SUBSYSTEM)
            .const_label("cluster", CLUSTER);
        let gauge = GaugeVec::new(opts, &["ip"])?;
        registry.register(Box::new(gauge.clone()))?;

        for result in &snapshot.results {
            if let Some(value) = result.totals.get(name) {
                gauge.with_label_values(&[&result.ip]).set(value);
            }
        }
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use impala_gc_core::model::{AggregateResult, GcTotals};

    fn one_node_snapshot() -> ScrapeSnapshot {
        ScrapeSnapshot {
            results: vec![AggregateResult {
                ip: "10.0.0.1".to_string(),
                totals: GcTotals {
                    total_used_after_gc: 30.0,
                    total_max_after_gc: 300.0,
                    total_commited_after_gc: 110.0,
                    total_init_after_gc: 10.0,
                    duration: 1.5,
                    ..GcTotals::default()
                },
            }],
        }
    }

    #[test]
    fn renders_namespaced_labeled_gauges() {
        let text = snapshot(&one_node_snapshot()).unwrap();
        assert!(text.contains("impala_jmx_totalUsedAfterGc"));
        assert!(text.contains("impala_jmx_duration"));
        assert!(text.contains("ip=\"10.0.0.1\""));
        assert!(text.contains("cluster=\"impala\""));
    }

    #[test]
    fn every_metric_name_is_emitted_per_node() {
        let text = snapshot(&one_node_snapshot()).unwrap();
        for name in METRIC_NAMES {
            assert!(
                text.contains(&format!("impala_jmx_{}", name)),
                "missing series for {}",
                name
            );
        }
    }

    #[test]
    fn empty_snapshot_renders_empty_body() {
        let text = snapshot(&ScrapeSnapshot::default()).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn failed_nodes_have_no_series_at_all() {
        // Only 10.0.0.1 succeeded this cycle; no other ip label may appear.
        let text = snapshot(&one_node_snapshot()).unwrap();
        assert!(!text.contains("10.0.0.2"));
    }
}
