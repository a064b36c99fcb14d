//! Configuration — defaults plus environment overrides.
//!
//! | Variable                   | Default                  |
//! |----------------------------|--------------------------|
//! | `ISS_API_URL`              | `http://localhost:8000`  |
//! | `ISS_POLL_INTERVAL_SECS`   | `15`                     |
//! | `ISS_HISTORY_CAPACITY`     | `20`                     |
//! | `ISS_REQUEST_TIMEOUT_SECS` | `20`                     |

use crate::domain::position::DEFAULT_HISTORY_CAPACITY;
use crate::error::ConfigError;
use crate::network::{API_URL_ENV, DEFAULT_API_URL};
use std::str::FromStr;
use std::time::Duration;

/// Default time between two scheduled poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub const POLL_INTERVAL_ENV: &str = "ISS_POLL_INTERVAL_SECS";
pub const HISTORY_CAPACITY_ENV: &str = "ISS_HISTORY_CAPACITY";
pub const REQUEST_TIMEOUT_ENV: &str = "ISS_REQUEST_TIMEOUT_SECS";

/// Poll-loop settings for one [`Poller`](crate::poller::Poller) session.
#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    /// Time between two scheduled cycles. The first cycle runs immediately.
    pub interval: Duration,
    /// Maximum number of samples kept in the history buffer.
    pub history_capacity: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Everything needed to build an [`IssClient`](crate::client::IssClient).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub poller: PollerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poller: PollerConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup. Unset or empty keys keep
    /// their defaults; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(url) = get(API_URL_ENV) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(API_URL_ENV, url, "expected an http(s) URL"));
            }
            settings.base_url = url.to_string();
        }

        if let Some(raw) = get(POLL_INTERVAL_ENV) {
            let secs: u64 = parse(POLL_INTERVAL_ENV, &raw)?;
            if secs == 0 {
                return Err(invalid(POLL_INTERVAL_ENV, &raw, "must be at least 1"));
            }
            settings.poller.interval = Duration::from_secs(secs);
        }

        if let Some(raw) = get(HISTORY_CAPACITY_ENV) {
            let capacity: usize = parse(HISTORY_CAPACITY_ENV, &raw)?;
            if capacity == 0 {
                return Err(invalid(HISTORY_CAPACITY_ENV, &raw, "must be at least 1"));
            }
            settings.poller.history_capacity = capacity;
        }

        if let Some(raw) = get(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = parse(REQUEST_TIMEOUT_ENV, &raw)?;
            settings.request_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(key, raw, &e.to_string()))
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.poller.interval, Duration::from_secs(15));
        assert_eq!(settings.poller.history_capacity, 20);
        assert_eq!(settings.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("ISS_API_URL", "https://iss.example.org/api"),
            ("ISS_POLL_INTERVAL_SECS", "5"),
            ("ISS_HISTORY_CAPACITY", " 50 "),
            ("ISS_REQUEST_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(settings.base_url, "https://iss.example.org/api");
        assert_eq!(settings.poller.interval, Duration::from_secs(5));
        assert_eq!(settings.poller.history_capacity, 50);
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let settings = Settings::from_lookup(lookup(&[("ISS_POLL_INTERVAL_SECS", "  ")])).unwrap();
        assert_eq!(settings.poller.interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_malformed_values_rejected() {
        let err = Settings::from_lookup(lookup(&[("ISS_POLL_INTERVAL_SECS", "fast")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ISS_POLL_INTERVAL_SECS", .. }));

        let err = Settings::from_lookup(lookup(&[("ISS_HISTORY_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ISS_HISTORY_CAPACITY", .. }));

        let err = Settings::from_lookup(lookup(&[("ISS_API_URL", "localhost:8000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ISS_API_URL", .. }));
    }
}
