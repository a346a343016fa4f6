use chrono::{DateTime, Datelike, FixedOffset};
use std::f64::consts::TAU;

use super::curves::{clamp01, dow_curve, hour_curve, weather_adjustment};
use super::types::{RushBreakdown, RushFactors, RushInput, ScoringMode};
use crate::features::hash::hash32;
use crate::features::{hour_bucket, stable_unit_hash};

const BASELINE: f64 = 0.15;
// Sum of the component maxima exceeds 1
const RESCALE: f64 = 1.4;
const VENUE_BIAS_WEIGHT: f64 = 0.2;
const COURT_BIAS_WEIGHT: f64 = 0.1;
const JITTER_AMPLITUDE: f64 = 0.06;
const TREND_AMPLITUDE: f64 = 0.04;
const TREND_PERIOD_WEEKS: f64 = 52.0;

/// Closed-form rush score for a single point in time
pub fn heuristic_score(input: &RushInput<'_>) -> RushBreakdown {
    score_with_mode(input, ScoringMode::Point)
}

/// Same curves as [`heuristic_score`] plus deterministic per-slot variation
pub fn score_slot(input: &RushInput<'_>) -> RushBreakdown {
    score_with_mode(input, ScoringMode::Slot)
}

pub fn score_with_mode(input: &RushInput<'_>, mode: ScoringMode) -> RushBreakdown {
    let slot = input.slot();
    let factors = RushFactors {
        hour: hour_curve(slot.hour),
        dow: dow_curve(slot.dow),
        venue_bias: stable_unit_hash(input.venue_id) * VENUE_BIAS_WEIGHT,
        court_bias: stable_unit_hash(input.court_id) * COURT_BIAS_WEIGHT,
        weather: weather_adjustment(slot.hour, input.outdoor),
    };

    let mut sum = BASELINE
        + factors.hour
        + factors.dow
        + factors.venue_bias
        + factors.court_bias
        + factors.weather;

    if mode == ScoringMode::Slot {
        sum += slot_jitter(input) + weekly_trend(&input.at);
    }

    RushBreakdown {
        raw: clamp01(clamp01(sum) / RESCALE),
        factors,
    }
}

fn slot_jitter(input: &RushInput<'_>) -> f64 {
    let key = format!("{}|{}|{}", hour_bucket(&input.at), input.venue_id, input.court_id);
    let unit = hash32(&key) as f64 / u32::MAX as f64;
    (unit * 2.0 - 1.0) * JITTER_AMPLITUDE
}

fn weekly_trend(at: &DateTime<FixedOffset>) -> f64 {
    let week = at.iso_week().week() as f64;
    TREND_AMPLITUDE * (TAU * week / TREND_PERIOD_WEEKS).sin()
}
