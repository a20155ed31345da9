//! Per-node scrape pipeline: fetch → decode → index → lookup → aggregate.
//!
//! Each scrape is independent. Every failure mode is a value of
//! [`ScrapeError`] handled at the coordinator boundary; a failing node never
//! aborts its siblings.

mod fetch;

pub use fetch::{FetchError, HttpFetcher, SnapshotFetcher};

use tracing::debug;

use crate::aggregate;
use crate::decode;
use crate::model::{AggregateResult, GC_BEAN_NAME, NodeTarget};
use crate::snapshot::{BeanIndex, JmxSnapshot};

/// Failure of a single node's scrape. Never fatal to the scrape cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeError {
    /// Transport error or non-success status while fetching the snapshot.
    FetchFailed { url: String, reason: String },
    /// The response body was not a valid JMX snapshot document.
    DecodeFailed { url: String, reason: String },
    /// The snapshot was valid but holds no bean with the target name.
    MetricNotFound { bean: String },
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::FetchFailed { url, reason } => {
                write!(f, "fetch failed for {}: {}", url, reason)
            }
            ScrapeError::DecodeFailed { url, reason } => {
                write!(f, "invalid snapshot from {}: {}", url, reason)
            }
            ScrapeError::MetricNotFound { bean } => {
                write!(f, "bean {} not present in snapshot", bean)
            }
        }
    }
}

impl std::error::Error for ScrapeError {}

/// Scrapes one node's JMX snapshot down to its aggregate totals.
pub struct NodeScraper<F> {
    fetcher: F,
}

impl<F: SnapshotFetcher> NodeScraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Runs the full fetch → decode → lookup → reduce sequence for `target`.
    pub async fn scrape(&self, target: &NodeTarget) -> Result<AggregateResult, ScrapeError> {
        let body = self.fetcher.fetch(&target.jmx_url).await.map_err(|e| {
            ScrapeError::FetchFailed {
                url: target.jmx_url.clone(),
                reason: e.to_string(),
            }
        })?;

        let snapshot: JmxSnapshot =
            serde_json::from_str(&body).map_err(|e| ScrapeError::DecodeFailed {
                url: target.jmx_url.clone(),
                reason: e.to_string(),
            })?;

        let index = BeanIndex::build(snapshot);
        let bean = index
            .lookup(GC_BEAN_NAME)
            .ok_or_else(|| ScrapeError::MetricNotFound {
                bean: GC_BEAN_NAME.to_string(),
            })?;

        let measurement = decode::gc_measurement(bean);
        let totals = aggregate::reduce(&measurement);
        debug!(ip = %target.ip, beans = index.len(), "node scraped");

        Ok(AggregateResult {
            ip: target.ip.clone(),
            totals,
        })
    }
}
