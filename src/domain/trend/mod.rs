//! Trend domain — backend-computed movement between the two latest records.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Movement between two samples, as computed by the backend.
///
/// Replaced wholesale on every successful fetch, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Whether the station is judged to have moved between the two samples.
    pub movement: bool,
    /// Great-circle displacement, km.
    pub delta_km: f64,
    /// Elapsed time between the two underlying samples, seconds.
    pub dt_sec: f64,
    /// Speed reported by the newer sample, km/h.
    pub velocity_kmh: Option<f64>,
    pub from: Option<GeoPoint>,
    pub to: Option<GeoPoint>,
    pub from_time: Option<DateTime<Utc>>,
    pub to_time: Option<DateTime<Utc>>,
}

impl TrendSummary {
    /// Initial bearing from `from` to `to`, degrees clockwise from north.
    ///
    /// `None` unless both endpoints are known and the station actually moved.
    pub fn heading_deg(&self) -> Option<f64> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from != to => Some(from.bearing_deg(&to)),
            _ => None,
        }
    }

    /// Average speed implied by `delta_km / dt_sec`, km/h.
    pub fn average_speed_kmh(&self) -> Option<f64> {
        if self.dt_sec > 0.0 {
            Some(self.delta_km / self.dt_sec * 3600.0)
        } else {
            None
        }
    }

    /// Whether the backend had two records to compare.
    pub fn has_endpoints(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}
