//! Conversion: feed payload → PositionSample (TryFrom + validation).

use super::wire::{LastResponse, PositionPayload};
use super::{PositionSample, TimestampSource, Visibility};
use crate::error::NormalizeError;
use chrono::{DateTime, Utc};

fn require(value: Option<f64>, field: &'static str) -> Result<f64, NormalizeError> {
    value.ok_or(NormalizeError::MissingField(field))
}

fn in_range(value: f64, field: &'static str, ok: bool) -> Result<f64, NormalizeError> {
    if ok {
        Ok(value)
    } else {
        Err(NormalizeError::OutOfRange { field, value })
    }
}

fn unix_seconds(secs: f64) -> Result<DateTime<Utc>, NormalizeError> {
    // Floor keeps the fraction non-negative for pre-1970 instants.
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999))
        .ok_or(NormalizeError::InvalidTimestamp(secs))
}

/// Converts a payload, using `fallback` as the timestamp when the feed carries none.
impl TryFrom<(PositionPayload, DateTime<Utc>)> for PositionSample {
    type Error = NormalizeError;

    fn try_from((payload, fallback): (PositionPayload, DateTime<Utc>)) -> Result<Self, Self::Error> {
        let latitude = require(payload.latitude, "latitude")?;
        let longitude = require(payload.longitude, "longitude")?;
        let altitude = require(payload.altitude, "altitude")?;
        let velocity = require(payload.velocity, "velocity")?;

        let latitude = in_range(latitude, "latitude", (-90.0..=90.0).contains(&latitude))?;
        let longitude = in_range(longitude, "longitude", (-180.0..=180.0).contains(&longitude))?;
        let altitude = in_range(altitude, "altitude", altitude > 0.0)?;
        let velocity = in_range(velocity, "velocity", velocity >= 0.0)?;

        let (timestamp, timestamp_source) = match payload.timestamp {
            Some(secs) => (unix_seconds(secs)?, TimestampSource::Feed),
            None => (fallback, TimestampSource::Fetched),
        };

        Ok(Self {
            latitude,
            longitude,
            altitude,
            velocity,
            timestamp,
            visibility: payload.visibility.as_deref().map(Visibility::parse),
            timestamp_source,
        })
    }
}

impl LastResponse {
    /// Normalizes the response into a sample.
    ///
    /// `Ok(None)` means the backend has no record yet. A payload without its own
    /// timestamp falls back to `fetched_at`, then to the local clock.
    pub fn into_sample(self) -> Result<Option<PositionSample>, NormalizeError> {
        let fallback = self.fetched_at.unwrap_or_else(Utc::now);
        match self.payload {
            Some(payload) => PositionSample::try_from((payload, fallback)).map(Some),
            None => Ok(None),
        }
    }
}
