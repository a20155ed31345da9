//! HTTP fetch seam for node snapshots.
//!
//! [`SnapshotFetcher`] abstracts the transport so the pipeline can run
//! against an in-memory fetcher in tests; [`HttpFetcher`] is the production
//! implementation over a shared reqwest client.

use std::time::Duration;

use async_trait::async_trait;

/// Failure of a single snapshot fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport-level failure: connect refused, DNS, timeout, read error.
    Transport(String),
    /// The node answered, but with a non-success status.
    Status(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {}", msg),
            FetchError::Status(code) => write!(f, "status code error: {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

/// Abstraction over the HTTP GET used to obtain a node's JMX snapshot.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Fetches the snapshot body from `url`.
    ///
    /// Implementations return [`FetchError::Status`] for any non-2xx
    /// response instead of handing the body downstream.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests time out after `timeout`.
    ///
    /// Called once at startup; a client build failure is a fatal
    /// configuration problem.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

#[async_trait]
impl SnapshotFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
