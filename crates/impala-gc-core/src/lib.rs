//! impala-gc-core — scrape-aggregate pipeline for the Impala GC exporter.
//!
//! Provides:
//! - `model` — pipeline data model, metric-name table, wire constants
//! - `snapshot` — raw `/jmx` document decoding and bean lookup
//! - `decode` — tolerant extraction of GC measurements from untyped beans
//! - `aggregate` — per-pool usage sums into fixed per-node totals
//! - `scraper` — per-node fetch → decode → aggregate pipeline and its HTTP seam
//! - `coordinator` — bounded-concurrency fan-out across all configured nodes

pub mod aggregate;
pub mod coordinator;
pub mod decode;
pub mod model;
pub mod scraper;
pub mod snapshot;

/// Crate version, reported by the exporter binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
