//! Wire types for position responses (REST `/last`, `/fetch`).

use crate::shared::serde_util::{lenient_datetime, lenient_f64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// REST response for the latest stored feed record.
///
/// Every field is optional: before the backend's first fetch it answers
/// `{"message": "no data"}` with everything else null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LastResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub payload: Option<PositionPayload>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The upstream feed payload as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PositionPayload {
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub altitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub velocity: Option<f64>,
    /// Unix seconds.
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub visibility: Option<String>,
}
