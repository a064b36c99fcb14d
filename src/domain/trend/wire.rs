//! Wire types for the trend response (REST `/iss/trend`).

use crate::shared::serde_util::{lenient_bool, lenient_datetime, lenient_f64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// REST response for the movement trend between the two latest records.
///
/// With fewer than two records the backend sends
/// `{"movement": false, "delta_km": 0.0, "dt_sec": 0.0}` and nulls elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendResponse {
    #[serde(default, deserialize_with = "lenient_bool::deserialize")]
    pub movement: Option<bool>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub delta_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub dt_sec: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub velocity_kmh: Option<f64>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub from_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub to_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub from_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub from_lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub to_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub to_lon: Option<f64>,
}
