//! Conversion: TrendResponse → TrendSummary.

use super::wire::TrendResponse;
use super::TrendSummary;
use crate::shared::GeoPoint;

fn point(lat: Option<f64>, lon: Option<f64>) -> Option<GeoPoint> {
    Some(GeoPoint::new(lat?, lon?))
}

/// Missing scalars read as "no movement observed"; half-known endpoints are dropped.
impl From<TrendResponse> for TrendSummary {
    fn from(r: TrendResponse) -> Self {
        Self {
            movement: r.movement.unwrap_or(false),
            delta_km: r.delta_km.unwrap_or(0.0),
            dt_sec: r.dt_sec.unwrap_or(0.0),
            velocity_kmh: r.velocity_kmh,
            from: point(r.from_lat, r.from_lon),
            to: point(r.to_lat, r.to_lon),
            from_time: r.from_time,
            to_time: r.to_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_conversion() {
        let resp = TrendResponse {
            movement: Some(true),
            delta_km: Some(114.8),
            dt_sec: Some(15.0),
            velocity_kmh: Some(27_612.4),
            from_lat: Some(10.0),
            from_lon: Some(20.0),
            to_lat: Some(10.6),
            to_lon: Some(20.9),
            ..TrendResponse::default()
        };
        let trend: TrendSummary = resp.into();
        assert!(trend.movement);
        assert_eq!(trend.from, Some(GeoPoint::new(10.0, 20.0)));
        assert_eq!(trend.to, Some(GeoPoint::new(10.6, 20.9)));
        assert_eq!(trend.velocity_kmh, Some(27_612.4));
    }

    #[test]
    fn test_sparse_response_conversion() {
        let resp = TrendResponse {
            from_lat: Some(10.0),
            ..TrendResponse::default()
        };
        let trend: TrendSummary = resp.into();
        assert!(!trend.movement);
        assert_eq!(trend.delta_km, 0.0);
        assert_eq!(trend.dt_sec, 0.0);
        assert_eq!(trend.from, None);
        assert_eq!(trend.to, None);
    }
}
