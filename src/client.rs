//! High-level client — `IssClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared HTTP client, and the poller
//! factory.

use crate::config::{PollerConfig, Settings, DEFAULT_REQUEST_TIMEOUT};
use crate::domain::position::client::Positions;
use crate::domain::trend::client::Trends;
use crate::error::SdkError;
use crate::http::{IssHttp, RetryPolicy};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::position::client::Positions as PositionsClient;
pub use crate::domain::trend::client::Trends as TrendsClient;

/// The primary entry point for the ISS tracker SDK.
///
/// Provides nested sub-client accessors for each domain
/// (`client.positions()`, `client.trends()`) and builds pollers that share the
/// same HTTP connection pool.
#[derive(Clone)]
pub struct IssClient {
    pub(crate) http: IssHttp,
    pub(crate) poller_config: PollerConfig,
}

impl IssClient {
    pub fn builder() -> IssClientBuilder {
        IssClientBuilder::default()
    }

    /// Build a client from `ISS_*` environment variables.
    pub fn from_env() -> Result<IssClient, SdkError> {
        IssClientBuilder::from_settings(Settings::from_env()?).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn positions(&self) -> Positions<'_> {
        Positions { client: self }
    }

    pub fn trends(&self) -> Trends<'_> {
        Trends { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn poller_config(&self) -> &PollerConfig {
        &self.poller_config
    }

    /// Create a stopped poller over this client's HTTP connection.
    ///
    /// Poller lifetimes are managed by the application (typically tied to a
    /// view), so the client does not keep one itself.
    #[cfg(feature = "poller")]
    pub fn poller(&self) -> crate::poller::Poller<IssHttp> {
        crate::poller::Poller::new(self.http.clone(), self.poller_config.clone())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct IssClientBuilder {
    base_url: String,
    request_timeout: Duration,
    poller_config: PollerConfig,
    retry_policy: RetryPolicy,
}

impl Default for IssClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poller_config: PollerConfig::default(),
            retry_policy: RetryPolicy::None,
        }
    }
}

impl IssClientBuilder {
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            base_url: settings.base_url,
            request_timeout: settings.request_timeout,
            poller_config: settings.poller,
            ..Self::default()
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poller_config.interval = interval;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.poller_config.history_capacity = capacity;
        self
    }

    /// Retry policy for the polled endpoints (`/last`, `/iss/trend`).
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<IssClient, SdkError> {
        if self.poller_config.interval.is_zero() {
            return Err(SdkError::Other("poll interval must be non-zero".to_string()));
        }

        Ok(IssClient {
            http: IssHttp::with_timeout(&self.base_url, self.request_timeout)?
                .with_retry(self.retry_policy),
            poller_config: self.poller_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = IssClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.poller_config(), &PollerConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let client = IssClient::builder()
            .base_url("https://iss.example.org/")
            .poll_interval(Duration::from_secs(5))
            .history_capacity(50)
            .retry_policy(RetryPolicy::Idempotent)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://iss.example.org");
        assert_eq!(client.poller_config().interval, Duration::from_secs(5));
        assert_eq!(client.poller_config().history_capacity, 50);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = IssClient::builder().poll_interval(Duration::ZERO).build();
        assert!(matches!(result, Err(SdkError::Other(_))));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            base_url: "http://10.0.0.5:8000".to_string(),
            ..Settings::default()
        };
        let client = IssClientBuilder::from_settings(settings).build().unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:8000");
    }

    #[cfg(feature = "poller")]
    #[test]
    fn test_poller_is_created_stopped() {
        let client = IssClient::builder().history_capacity(7).build().unwrap();
        let poller = client.poller();
        assert!(!poller.is_running());
        assert_eq!(poller.snapshot().history.capacity(), 7);
    }
}
