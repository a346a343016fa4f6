use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::features::SlotTime;

/// Point scoring is the plain closed-form curve; slot scoring adds
/// per-hour jitter and a yearly trend so weekly grids are not banded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Point,
    Slot,
}

#[derive(Debug, Clone)]
pub struct RushInput<'a> {
    pub at: DateTime<FixedOffset>,
    pub venue_id: &'a str,
    pub court_id: &'a str,
    pub outdoor: bool,
}

impl RushInput<'_> {
    pub fn slot(&self) -> SlotTime {
        SlotTime::from_datetime(&self.at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RushFactors {
    pub hour: f64,
    pub dow: f64,
    pub venue_bias: f64,
    pub court_bias: f64,
    pub weather: f64,
}

/// Raw (pre-normalization) score with the terms that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RushBreakdown {
    pub raw: f64,
    pub factors: RushFactors,
}
