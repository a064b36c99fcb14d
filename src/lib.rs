//! # ISS Tracker SDK
//!
//! A Rust client for the ISS tracking backend: polls the station's position and
//! movement trend, keeps a deduplicated, bounded history of samples, and hands
//! render-ready data to a dashboard.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Geo helpers, wire types, normalization, history buffer (always available)
//! 2. **Config** — Defaults and `ISS_*` environment overrides
//! 3. **HTTP API** — `IssHttp` with per-endpoint retry policies
//! 4. **Poller** — `Poller`: timer-driven sampling session with change notifications
//! 5. **High-Level Client** — `IssClient` with nested sub-clients and a poller factory
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use iss_tracker_sdk::prelude::*;
//!
//! let client = IssClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//!
//! let mut poller = client.poller();
//! poller.start();
//!
//! let mut updates = std::pin::pin!(poller.updates());
//! while let Some(state) = updates.next().await {
//!     println!("{} samples, error: {:?}", state.history.len(), state.error);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared geo types and serde helpers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Config ──────────────────────────────────────────────────────────

/// Settings, defaults and environment loading.
pub mod config;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Poller ──────────────────────────────────────────────────────────

/// Polling session: timer, dual fetch, history tracking.
#[cfg(feature = "poller")]
pub mod poller;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `IssClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types
    pub use crate::shared::{GeoPoint, SeriesPoint};

    // Domain types — position
    pub use crate::domain::position::{
        HistoryBuffer, PositionSample, RecordOutcome, TimestampSource, Visibility,
    };

    // Domain types — trend
    pub use crate::domain::trend::TrendSummary;

    // Errors
    pub use crate::error::{ConfigError, HttpError, NormalizeError, SdkError};

    // Config + network
    pub use crate::config::{PollerConfig, Settings};
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{IssClient, IssClientBuilder, PositionsClient, TrendsClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // Poller
    #[cfg(feature = "poller")]
    pub use crate::poller::{Poller, TelemetrySource, TelemetryState};
}
