use std::f64::consts::TAU;

use super::hash::stable_unit_hash;
use super::types::{FeatureVector, SlotTime};

const PRICE_CEILING: f64 = 2000.0;
const DEFAULT_NORMALIZED_PRICE: f64 = 0.25;

pub fn encode_features(
    slot: SlotTime,
    venue_id: &str,
    court_id: &str,
    base_price: f64,
    outdoor: bool,
) -> FeatureVector {
    let (hour_sin, hour_cos) = cyclic(slot.hour as f64, 24.0);
    let (dow_sin, dow_cos) = cyclic(slot.dow as f64, 7.0);

    FeatureVector([
        hour_sin,
        hour_cos,
        dow_sin,
        dow_cos,
        stable_unit_hash(venue_id),
        stable_unit_hash(court_id),
        normalize_price(base_price),
        if outdoor { 1.0 } else { 0.0 },
    ])
}

fn cyclic(value: f64, period: f64) -> (f64, f64) {
    let angle = TAU * value / period;
    (angle.sin(), angle.cos())
}

pub fn normalize_price(price: f64) -> f64 {
    if !price.is_finite() || price <= 0.0 {
        return DEFAULT_NORMALIZED_PRICE;
    }
    (price / PRICE_CEILING).min(1.0)
}
