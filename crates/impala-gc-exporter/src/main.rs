//! impala-gc-exporter — Prometheus exporter for Impala daemon GC metrics.
//!
//! On every Prometheus pull, fetches each configured node's `/jmx` snapshot,
//! aggregates the garbage collector bean's per-pool memory usage into
//! per-node totals, and serves the result on `/metrics`.

mod handlers;
mod render;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use impala_gc_core::model::{NodeTarget, ScrapeConfig};
use impala_gc_core::scraper::{HttpFetcher, NodeScraper};

use handlers::ExporterState;

// ============================================================
// CLI
// ============================================================

/// Prometheus exporter for Impala daemon JMX GC metrics.
#[derive(Parser)]
#[command(name = "impala-gc-exporter", about = "Prometheus exporter for Impala JMX GC metrics", version = impala_gc_core::VERSION)]
struct Args {
    /// Comma-separated list of Impala node addresses to scrape.
    #[arg(long, env = "NODE_IP", value_delimiter = ',', required = true)]
    nodes: Vec<String>,

    /// JMX HTTP port of each Impala daemon.
    #[arg(long, default_value = "25000", env = "IMPALA_PORT")]
    node_port: u16,

    /// Exporter listen port.
    #[arg(long, default_value = "9206", env = "PORT")]
    listen_port: u16,

    /// Maximum number of concurrent node scrapes.
    #[arg(long, default_value = "3", env = "NUM_WORKERS")]
    max_concurrent: usize,

    /// Per-node scrape timeout in seconds.
    #[arg(long, default_value = "10")]
    scrape_timeout: u64,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("impala_gc_exporter={}", level).parse().unwrap())
        .add_directive(format!("impala_gc_core={}", level).parse().unwrap());

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(async_main(args));
}

async fn async_main(args: Args) {
    let targets: Vec<NodeTarget> = args
        .nodes
        .iter()
        .map(|ip| ip.trim())
        .filter(|ip| !ip.is_empty())
        .map(|ip| NodeTarget::new(ip, args.node_port))
        .collect();

    let config = ScrapeConfig::new(targets).with_max_concurrency(args.max_concurrent);
    info!(
        version = impala_gc_core::VERSION,
        nodes = config.targets.len(),
        node_port = args.node_port,
        max_concurrent = config.max_concurrency,
        "starting exporter"
    );

    let fetcher = HttpFetcher::new(Duration::from_secs(args.scrape_timeout));
    let scraper = Arc::new(NodeScraper::new(fetcher));
    let state = Arc::new(ExporterState { config, scraper });

    let app = Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(handlers::handle_health))
        .route("/metrics", get(handlers::handle_metrics))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.listen_port));
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server error");
}
