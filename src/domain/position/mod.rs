//! Position domain — ISS position samples and the rolling sample history.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use state::{HistoryBuffer, RecordOutcome, DEFAULT_HISTORY_CAPACITY};

/// One observed ISS position.
///
/// Created only from a successful `/last` response and never mutated afterwards.
/// `timestamp` is the dedup key: two samples with equal timestamps are the same
/// observation regardless of any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Degrees, `[-180, 180]`.
    pub longitude: f64,
    /// Kilometres above the surface.
    pub altitude: f64,
    /// km/h.
    pub velocity: f64,
    /// When the sample was valid, not when it was fetched.
    pub timestamp: DateTime<Utc>,
    pub visibility: Option<Visibility>,
    pub timestamp_source: TimestampSource,
}

impl PositionSample {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Whether the timestamp came from the feed itself and can key the history.
    pub fn has_feed_timestamp(&self) -> bool {
        self.timestamp_source == TimestampSource::Feed
    }
}

/// Where a sample's timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    /// The upstream payload carried its own observation time.
    Feed,
    /// The payload had none; the backend's fetch time (or the local clock) was used.
    Fetched,
}

/// Solar illumination of the station at the sample time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Daylight,
    Eclipsed,
    #[serde(other)]
    Unknown,
}

impl Visibility {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "daylight" => Self::Daylight,
            "eclipsed" => Self::Eclipsed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daylight => "daylight",
            Self::Eclipsed => "eclipsed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
