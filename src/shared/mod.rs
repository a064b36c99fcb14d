//! Shared geo types and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the shape the map and chart layers consume, so they can be handed to a
//! renderer without conversion.

pub mod serde_util;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ─── GeoPoint ────────────────────────────────────────────────────────────────

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` (haversine), in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }

    /// Initial bearing towards `other`, in degrees clockwise from north `[0, 360)`.
    pub fn bearing_deg(&self, other: &GeoPoint) -> f64 {
        initial_bearing_deg(self.lat, self.lon, other.lat, other.lon)
    }

    /// `[lat, lon]` pair, the order map polylines expect.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}°, {:.4}°)", self.lat, self.lon)
    }
}

// ─── SeriesPoint ─────────────────────────────────────────────────────────────

/// A single data point on a time-series chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Great-circle distance between two points given in degrees, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let rlat1 = lat1.to_radians();
    let rlat2 = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + rlat1.cos() * rlat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial great-circle bearing from point 1 to point 2, normalized to `[0, 360)`.
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let rlat1 = lat1.to_radians();
    let rlat2 = lat2.to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let y = dlon.sin() * rlat2.cos();
    let x = rlat1.cos() * rlat2.sin() - rlat1.sin() * rlat2.cos() * dlon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point_is_zero() {
        assert_eq!(haversine_km(51.5, -0.12, 51.5, -0.12), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_on_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_haversine_crosses_antimeridian() {
        let d = haversine_km(0.0, 179.5, 0.0, -179.5);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!((origin.bearing_deg(&GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((origin.bearing_deg(&GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_deg(&GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((origin.bearing_deg(&GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_geo_point_serde() {
        let p = GeoPoint::new(12.5, -45.25);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"lat":12.5,"lon":-45.25}"#);
        assert_eq!(p.as_pair(), [12.5, -45.25]);
    }
}
