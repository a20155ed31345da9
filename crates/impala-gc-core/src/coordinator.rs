//! Bounded fan-out of per-node scrapes with a full cycle barrier.
//!
//! One task is spawned per configured target; a semaphore keeps at most
//! `max_concurrency` fetches in flight at once. The cycle completes only
//! when every launched task has reached a terminal state. A failed node is
//! logged and simply absent from the resulting snapshot — its labels
//! disappear for this cycle instead of reporting zeros.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::model::{ScrapeConfig, ScrapeSnapshot};
use crate::scraper::{NodeScraper, SnapshotFetcher};

/// Runs one full scrape cycle over all configured targets.
///
/// Targets with an empty URL are skipped up front and never consume a
/// worker slot. Completion order is irrelevant: each result carries its own
/// node identity.
pub async fn collect<F>(config: &ScrapeConfig, scraper: &Arc<NodeScraper<F>>) -> ScrapeSnapshot
where
    F: SnapshotFetcher + 'static,
{
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));
    let mut tasks = JoinSet::new();

    for target in &config.targets {
        if target.jmx_url.is_empty() {
            debug!(ip = %target.ip, "target has no snapshot URL, skipping");
            continue;
        }

        let semaphore = Arc::clone(&semaphore);
        let scraper = Arc::clone(scraper);
        let target = target.clone();
        tasks.spawn(async move {
            // The semaphore is never closed while tasks hold clones of it.
            let _permit = semaphore.acquire().await.expect("semaphore closed");
            scraper.scrape(&target).await
        });
    }

    let mut snapshot = ScrapeSnapshot::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(result)) => {
                debug!(ip = %result.ip, "scrape succeeded");
                snapshot.results.push(result);
            }
            Ok(Err(e)) => warn!(error = %e, "scrape failed, node skipped this cycle"),
            Err(e) => warn!(error = %e, "scrape task panicked"),
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::json;

    use crate::model::{GC_BEAN_NAME, NodeTarget};
    use crate::scraper::FetchError;

    #[derive(Default)]
    struct Counters {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    /// Fetcher that tracks how many fetches overlap while replaying a
    /// fixed body.
    #[derive(Clone)]
    struct CountingFetcher {
        body: String,
        counters: Arc<Counters>,
    }

    #[async_trait::async_trait]
    impl SnapshotFetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.counters.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.counters.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(25)).await;
            self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    /// Fetcher that fails for one specific node and succeeds elsewhere.
    struct FailOneFetcher {
        failing_ip: &'static str,
        body: String,
    }

    #[async_trait::async_trait]
    impl SnapshotFetcher for FailOneFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            if url.contains(self.failing_ip) {
                Err(FetchError::Status(500))
            } else {
                Ok(self.body.clone())
            }
        }
    }

    fn gc_body() -> String {
        json!({
            "beans": [{
                "name": GC_BEAN_NAME,
                "LastGcInfo": {
                    "duration": 1.0,
                    "MemoryUsageAfterGc": [],
                    "MemoryUsageBeforeGc": [],
                },
            }]
        })
        .to_string()
    }

    fn targets(n: usize) -> Vec<NodeTarget> {
        (1..=n)
            .map(|i| NodeTarget::new(format!("10.0.0.{}", i), 25000))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn in_flight_scrapes_never_exceed_cap() {
        let counters = Arc::new(Counters::default());
        let scraper = Arc::new(NodeScraper::new(CountingFetcher {
            body: gc_body(),
            counters: Arc::clone(&counters),
        }));
        let config = ScrapeConfig::new(targets(8)).with_max_concurrency(3);

        let snapshot = collect(&config, &scraper).await;

        assert_eq!(snapshot.results.len(), 8);
        assert_eq!(counters.calls.load(Ordering::SeqCst), 8);
        assert!(counters.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn serial_cap_still_collects_every_target() {
        let counters = Arc::new(Counters::default());
        let scraper = Arc::new(NodeScraper::new(CountingFetcher {
            body: gc_body(),
            counters: Arc::clone(&counters),
        }));
        let config = ScrapeConfig::new(targets(3)).with_max_concurrency(1);

        let snapshot = collect(&config, &scraper).await;

        assert_eq!(snapshot.results.len(), 3);
        assert_eq!(counters.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_url_target_never_spawns_a_fetch() {
        let counters = Arc::new(Counters::default());
        let scraper = Arc::new(NodeScraper::new(CountingFetcher {
            body: gc_body(),
            counters: Arc::clone(&counters),
        }));
        let mut list = targets(1);
        list.push(NodeTarget {
            ip: "10.0.0.99".to_string(),
            jmx_url: String::new(),
        });
        let config = ScrapeConfig::new(list);

        let snapshot = collect(&config, &scraper).await;

        assert_eq!(snapshot.results.len(), 1);
        assert_eq!(counters.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_node_leaves_siblings_untouched() {
        let scraper = Arc::new(NodeScraper::new(FailOneFetcher {
            failing_ip: "10.0.0.2",
            body: gc_body(),
        }));
        let config = ScrapeConfig::new(targets(3));

        let snapshot = collect(&config, &scraper).await;

        let mut ips: Vec<&str> = snapshot.results.iter().map(|r| r.ip.as_str()).collect();
        ips.sort_unstable();
        assert_eq!(ips, ["10.0.0.1", "10.0.0.3"]);
    }
}
