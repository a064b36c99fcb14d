//! Custom serde helpers for backend wire formats.
//!
//! The backend stores the upstream feed payload as raw JSON, so numeric fields
//! can arrive as numbers or as numeric strings. These helpers never fail on a
//! bad value: anything unparsable is read as absent.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

fn value_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn value_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        _ => None,
    }
}

fn value_to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let Value::String(s) = value else {
        return None;
    };
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Naive timestamps are UTC.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Deserializes a number or numeric string into `Option<f64>`.
///
/// Use with `#[serde(default, deserialize_with = "lenient_f64::deserialize")]`.
pub mod lenient_f64 {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::value_to_f64(&value))
    }
}

/// Deserializes a boolean, `"true"`/`"false"` string or 0/1 into `Option<bool>`.
pub mod lenient_bool {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::value_to_bool(&value))
    }
}

/// Deserializes an RFC 3339 or naive (UTC) datetime string into
/// `Option<DateTime<Utc>>`.
pub mod lenient_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::value_to_datetime(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64::deserialize")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "lenient_bool::deserialize")]
        b: Option<bool>,
        #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
        t: Option<DateTime<Utc>>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_and_numeric_string() {
        assert_eq!(probe(r#"{"n": 408.5}"#).n, Some(408.5));
        assert_eq!(probe(r#"{"n": 27600}"#).n, Some(27600.0));
        assert_eq!(probe(r#"{"n": " -51.2 "}"#).n, Some(-51.2));
    }

    #[test]
    fn test_unparsable_number_is_absent() {
        assert_eq!(probe(r#"{"n": "n/a"}"#).n, None);
        assert_eq!(probe(r#"{"n": null}"#).n, None);
        assert_eq!(probe(r#"{"n": {"x": 1}}"#).n, None);
        assert_eq!(probe(r#"{}"#).n, None);
    }

    #[test]
    fn test_bool_variants() {
        assert_eq!(probe(r#"{"b": true}"#).b, Some(true));
        assert_eq!(probe(r#"{"b": "False"}"#).b, Some(false));
        assert_eq!(probe(r#"{"b": 1}"#).b, Some(true));
        assert_eq!(probe(r#"{"b": "moving"}"#).b, None);
    }

    #[test]
    fn test_datetime_variants() {
        use chrono::TimeZone;
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 3).unwrap();
        assert_eq!(probe(r#"{"t": "2024-05-01T12:00:03Z"}"#).t, Some(expected));
        assert_eq!(probe(r#"{"t": "2024-05-01T14:00:03+02:00"}"#).t, Some(expected));
        assert_eq!(probe(r#"{"t": "2024-05-01T12:00:03"}"#).t, Some(expected));
        assert_eq!(probe(r#"{"t": "2024-05-01 12:00:03.000"}"#).t, Some(expected));
        assert_eq!(probe(r#"{"t": "yesterday"}"#).t, None);
        assert_eq!(probe(r#"{"t": 1714564803}"#).t, None);
    }
}
