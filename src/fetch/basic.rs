use std::time::Duration;

use super::client::HttpClient;
use async_trait::async_trait;
use tracing::warn;

/// Request timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("taxi_analytics/", env!("CARGO_PKG_VERSION"));

/// `reqwest` client that identifies itself and gives up on a stalled source.
pub struct BasicClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl BasicClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP client setup failed, using reqwest defaults");
                reqwest::Client::new()
            });
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.inner.execute(req).await
    }
}
