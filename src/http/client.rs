//! Low-level HTTP client — `IssHttp`.
//!
//! One method per API endpoint. Returns wire types (normalization to domain
//! types happens in the sub-clients and the poller).

use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::domain::position::wire::LastResponse;
use crate::domain::trend::wire::TrendResponse;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the ISS tracker REST API.
#[derive(Clone)]
pub struct IssHttp {
    base_url: String,
    client: Client,
    /// Policy applied to the polled GET endpoints.
    poll_retry: RetryPolicy,
}

impl IssHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            poll_retry: RetryPolicy::None,
        })
    }

    /// Set the retry policy for `/last` and `/iss/trend`.
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.poll_retry = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Position ─────────────────────────────────────────────────────────

    pub async fn get_last(&self) -> Result<LastResponse, HttpError> {
        let url = format!("{}/last", self.base_url);
        self.get(&url, &self.poll_retry).await
    }

    /// Trigger a backend-side refresh; returns the refreshed `/last` body.
    pub async fn trigger_fetch(&self) -> Result<LastResponse, HttpError> {
        let url = format!("{}/fetch", self.base_url);
        self.get(&url, &RetryPolicy::None).await
    }

    // ── Trend ────────────────────────────────────────────────────────────

    pub async fn get_trend(&self) -> Result<TrendResponse, HttpError> {
        let url = format!("{}/iss/trend", self.base_url);
        self.get(&url, &self.poll_retry).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if !config.should_retry(&e) {
                        return Err(e);
                    }
                    if attempt == config.max_retries {
                        last_error = Some(e);
                        break;
                    }

                    let delay = match &e {
                        HttpError::RateLimited {
                            retry_after_ms: Some(ms),
                        } => Duration::from_millis(*ms).min(config.max_delay),
                        _ => config.delay_for_attempt(attempt),
                    };
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body_text = resp.text().await.unwrap_or_default();

        Err(status_error(status_code, body_text, retry_after_ms))
    }
}

/// `Retry-After` in delay-seconds form, as milliseconds. Values too large to
/// represent are dropped.
fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()?.checked_mul(1000)
}

fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}
