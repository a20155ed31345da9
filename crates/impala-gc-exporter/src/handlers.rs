//! HTTP request handlers: metrics exposition, health, landing page.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use tracing::{debug, error};

use impala_gc_core::coordinator;
use impala_gc_core::model::ScrapeConfig;
use impala_gc_core::scraper::{HttpFetcher, NodeScraper};

use crate::render;

/// Shared immutable exporter state: the static scrape config plus the
/// node scraper over the production HTTP fetcher.
pub(crate) struct ExporterState {
    pub(crate) config: ScrapeConfig,
    pub(crate) scraper: Arc<NodeScraper<HttpFetcher>>,
}

// ============================================================
// Metrics
// ============================================================

/// Runs one full scrape cycle and renders the snapshot in Prometheus text
/// format. Nodes that failed this cycle have no series in the output.
pub(crate) async fn handle_metrics(
    State(state): State<Arc<ExporterState>>,
) -> Result<String, StatusCode> {
    let start = Instant::now();
    let snapshot = coordinator::collect(&state.config, &state.scraper).await;
    debug!(
        nodes = snapshot.results.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "scrape cycle complete"
    );

    render::snapshot(&snapshot).map_err(|e| {
        error!(error = %e, "failed to render metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

// ============================================================
// Health / landing page
// ============================================================

pub(crate) async fn handle_health() -> &'static str {
    "ok"
}

pub(crate) async fn handle_index() -> Html<&'static str> {
    Html(
        "<html><head><title>Impala GC Exporter</title></head>\
         <body><h1>Impala GC Exporter</h1>\
         <p><a href=\"/metrics\">Metrics</a></p></body></html>",
    )
}
