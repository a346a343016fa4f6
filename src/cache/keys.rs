use chrono::{DateTime, FixedOffset};
use std::fmt;

use crate::features::hour_bucket;

/// Cache key for a single-point prediction. Every option that changes the
/// payload is part of the key.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionKey<'a> {
    pub kind: &'static str,
    pub venue_id: &'a str,
    pub court_id: &'a str,
    pub at: DateTime<FixedOffset>,
    pub duration_hours: u32,
    pub outdoor: bool,
    pub base_price: Option<f64>,
    pub benchmark_price: Option<f64>,
    pub k: Option<f64>,
    pub cap: Option<f64>,
}

impl<'a> PredictionKey<'a> {
    pub fn rush(
        venue_id: &'a str,
        court_id: &'a str,
        at: DateTime<FixedOffset>,
        duration_hours: u32,
        outdoor: bool,
    ) -> Self {
        Self {
            kind: "rush",
            venue_id,
            court_id,
            at,
            duration_hours,
            outdoor,
            base_price: None,
            benchmark_price: None,
            k: None,
            cap: None,
        }
    }
}

impl fmt::Display for PredictionKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // venue length prefix keeps "a|b" + "c" apart from "a" + "b|c"
        write!(
            f,
            "{}|{}|{}|{}|{}|d={}|o={}|p={}|b={}|k={}|c={}",
            self.kind,
            self.venue_id.len(),
            self.venue_id,
            self.court_id,
            hour_bucket(&self.at),
            self.duration_hours,
            self.outdoor,
            opt(self.base_price),
            opt(self.benchmark_price),
            opt(self.k),
            opt(self.cap),
        )
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn test_same_hour_shares_key() {
        let a = PredictionKey::rush("v", "c", at("2024-06-01T18:05:00Z"), 1, false);
        let b = PredictionKey::rush("v", "c", at("2024-06-01T18:55:00Z"), 1, false);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_every_option_changes_key() {
        let base = PredictionKey {
            kind: "price",
            base_price: Some(500.0),
            benchmark_price: Some(500.0),
            k: Some(0.6),
            cap: Some(0.3),
            ..PredictionKey::rush("v", "c", at("2024-06-01T18:05:00Z"), 1, false)
        };
        let variants = [
            PredictionKey { outdoor: true, ..base.clone() },
            PredictionKey { base_price: Some(501.0), ..base.clone() },
            PredictionKey { benchmark_price: None, ..base.clone() },
            PredictionKey { k: Some(0.7), ..base.clone() },
            PredictionKey { cap: Some(0.2), ..base.clone() },
            PredictionKey { duration_hours: 2, ..base.clone() },
            PredictionKey { court_id: "c2", ..base.clone() },
            PredictionKey { kind: "rush", ..base.clone() },
            PredictionKey { at: at("2024-06-01T19:05:00Z"), ..base.clone() },
        ];
        for variant in variants {
            assert_ne!(variant.to_string(), base.to_string());
        }
    }

    #[test]
    fn test_ids_cannot_bleed_into_each_other() {
        let a = PredictionKey::rush("v|x", "c", at("2024-06-01T18:00:00Z"), 1, false);
        let b = PredictionKey::rush("v", "x|c", at("2024-06-01T18:00:00Z"), 1, false);
        assert_ne!(a.to_string(), b.to_string());
    }
}
