//! Field deserializers that never reject a request: malformed values
//! become `None` and callers apply their defaults.

use chrono::{DateTime, FixedOffset};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::timestamps::{from_epoch_millis, parse_timestamp};

pub fn f64_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value))
}

pub fn bool_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_bool(&value))
}

pub fn hours_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value)
        .map(f64::floor)
        .filter(|h| *h >= 1.0 && *h <= u32::MAX as f64)
        .map(|h| h as u32))
}

pub fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Timestamp strings or epoch-millisecond numbers. Present but unreadable
/// values are logged before the caller falls back to "now".
pub fn timestamp_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .and_then(from_epoch_millis),
        _ => None,
    };
    if parsed.is_none() {
        warn!("Unreadable timestamp {}, using the current time", value);
    }
    Ok(parsed)
}

fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v: &f64| v.is_finite())
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Default)]
    struct Sample {
        #[serde(default, deserialize_with = "f64_or_none")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "bool_or_none")]
        outdoor: Option<bool>,
        #[serde(default, deserialize_with = "hours_or_none")]
        hours: Option<u32>,
        #[serde(default, deserialize_with = "string_or_none")]
        id: Option<String>,
        #[serde(default, deserialize_with = "timestamp_or_none")]
        at: Option<DateTime<FixedOffset>>,
    }

    fn sample(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_well_formed_values() {
        let p = sample(json!({"price": 450.5, "outdoor": true, "hours": 2, "id": "court-1"}));
        assert_eq!(p.price, Some(450.5));
        assert_eq!(p.outdoor, Some(true));
        assert_eq!(p.hours, Some(2));
        assert_eq!(p.id.as_deref(), Some("court-1"));
    }

    #[test]
    fn test_coerces_strings_and_numbers() {
        let p = sample(json!({"price": " 300 ", "outdoor": "yes", "hours": "3.7", "id": 42}));
        assert_eq!(p.price, Some(300.0));
        assert_eq!(p.outdoor, Some(true));
        assert_eq!(p.hours, Some(3));
        assert_eq!(p.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_malformed_values_become_none() {
        let p = sample(json!({"price": "cheap", "outdoor": [1], "hours": 0, "id": null}));
        assert_eq!(p.price, None);
        assert_eq!(p.outdoor, None);
        assert_eq!(p.hours, None);
        assert_eq!(p.id, None);

        let empty = sample(json!({}));
        assert!(empty.price.is_none() && empty.hours.is_none());
        assert!(empty.at.is_none());
    }

    #[test]
    fn test_timestamps_from_strings_and_millis() {
        let rfc = sample(json!({"at": "2024-06-01T19:00:00+02:00"}));
        assert_eq!(rfc.at.unwrap().to_rfc3339(), "2024-06-01T19:00:00+02:00");

        let compact = sample(json!({"at": "2024-06-01T19:00:00+0200"}));
        assert_eq!(compact.at.unwrap().to_rfc3339(), "2024-06-01T19:00:00+02:00");

        let date = sample(json!({"at": "2024-06-01"}));
        assert_eq!(date.at.unwrap().to_rfc3339(), "2024-06-01T00:00:00+00:00");

        let millis = sample(json!({"at": 1717268400000_i64}));
        assert_eq!(millis.at.unwrap().to_rfc3339(), "2024-06-01T19:00:00+00:00");
    }

    #[test]
    fn test_unreadable_timestamps_become_none() {
        assert!(sample(json!({"at": "soon"})).at.is_none());
        assert!(sample(json!({"at": [2024]})).at.is_none());
        assert!(sample(json!({"at": null})).at.is_none());
    }
}
