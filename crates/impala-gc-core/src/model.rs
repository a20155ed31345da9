//! Data model for the scrape pipeline.
//!
//! Everything here except [`ScrapeConfig`] is built fresh during a single
//! scrape cycle and handed off by value to the next stage; only the config
//! lives for the process lifetime.

/// Name of the garbage-collector MBean looked up in each node's snapshot.
pub const GC_BEAN_NAME: &str = "java.lang:type=GarbageCollector,name=PS MarkSweep";

/// Path of the JMX servlet on each Impala daemon.
pub const JMX_PATH: &str = "/jmx";

/// Exported metric names, in emission order.
///
/// "Commited" (single t) is part of the established metric contract and
/// must not be corrected.
pub const METRIC_NAMES: [&str; 9] = [
    "totalCommitedAfterGc",
    "totalInitAfterGc",
    "totalUsedAfterGc",
    "totalMaxAfterGc",
    "totalCommitedBeforeGc",
    "totalInitBeforeGc",
    "totalUsedBeforeGc",
    "totalMaxBeforeGc",
    "duration",
];

/// One monitored Impala daemon.
#[derive(Debug, Clone)]
pub struct NodeTarget {
    /// Node address, used verbatim as the `ip` metric label.
    pub ip: String,
    /// Full URL of the node's JMX snapshot endpoint. Empty means the node
    /// is configured but not scraped.
    pub jmx_url: String,
}

impl NodeTarget {
    /// Creates a target whose snapshot URL is `http://{ip}:{port}/jmx`.
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        let ip = ip.into();
        let jmx_url = format!("http://{}:{}{}", ip, port, JMX_PATH);
        Self { ip, jmx_url }
    }
}

/// Static scrape configuration, built once at startup and passed by
/// reference into the coordinator.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub targets: Vec<NodeTarget>,
    /// Maximum number of node scrapes in flight at once. Always >= 1.
    pub max_concurrency: usize,
}

impl ScrapeConfig {
    /// Default in-flight scrape cap. The management endpoints live on
    /// resource-constrained production hosts; unbounded fan-out risks
    /// overloading them.
    pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

    pub fn new(targets: Vec<NodeTarget>) -> Self {
        Self {
            targets,
            max_concurrency: Self::DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Overrides the concurrency cap, clamping to at least 1.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

/// One memory pool's usage measurement inside a GC event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoolUsage {
    pub used: f64,
    pub max: f64,
    pub committed: f64,
    pub init: f64,
}

/// Decoded GC bean content: last-GC duration plus the per-pool usage
/// reported before and after the collection.
///
/// Pool order and identity are not significant here; only the sums matter
/// downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcMeasurement {
    pub duration: f64,
    pub usage_after_gc: Vec<PoolUsage>,
    pub usage_before_gc: Vec<PoolUsage>,
}

/// Fixed-width per-node summary: one value per exported metric name.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GcTotals {
    pub total_commited_after_gc: f64,
    pub total_init_after_gc: f64,
    pub total_used_after_gc: f64,
    pub total_max_after_gc: f64,
    pub total_commited_before_gc: f64,
    pub total_init_before_gc: f64,
    pub total_used_before_gc: f64,
    pub total_max_before_gc: f64,
    pub duration: f64,
}

impl GcTotals {
    /// Values paired with their metric names, in [`METRIC_NAMES`] order.
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            (METRIC_NAMES[0], self.total_commited_after_gc),
            (METRIC_NAMES[1], self.total_init_after_gc),
            (METRIC_NAMES[2], self.total_used_after_gc),
            (METRIC_NAMES[3], self.total_max_after_gc),
            (METRIC_NAMES[4], self.total_commited_before_gc),
            (METRIC_NAMES[5], self.total_init_before_gc),
            (METRIC_NAMES[6], self.total_used_before_gc),
            (METRIC_NAMES[7], self.total_max_before_gc),
            (METRIC_NAMES[8], self.duration),
        ]
    }

    /// Looks up a total by its exported metric name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}

/// Aggregated totals for one node, tagged with its `ip` label.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    pub ip: String,
    pub totals: GcTotals,
}

/// One complete scrape cycle: totals for every node that succeeded.
///
/// Rebuilt from scratch on every pull and superseded, never merged, by the
/// next cycle.
#[derive(Debug, Clone, Default)]
pub struct ScrapeSnapshot {
    pub results: Vec<AggregateResult>,
}
