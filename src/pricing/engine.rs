use super::types::{PriceSuggestion, PriceTerms};
use crate::config::settings::PricingSettings;
use crate::rush::curves::clamp01;

/// Turns a rush score into a capped price, damping demand when the court
/// is priced above its benchmark.
pub fn suggest_price(terms: &PriceTerms, rush_score: f64, settings: &PricingSettings) -> PriceSuggestion {
    let relative = terms.base_price / terms.benchmark_price;
    let price_adjustment = clamp01(1.0 - settings.elasticity * (relative - 1.0));
    let effective_rush = clamp01(clamp01(rush_score) * price_adjustment.clamp(settings.rush_floor, 1.0));

    let raw_multiplier = 1.0 + terms.k * effective_rush;
    let capped_multiplier = raw_multiplier.min(1.0 + terms.cap);

    PriceSuggestion {
        suggested_price: (terms.base_price * capped_multiplier).round().max(0.0) as i64,
        effective_rush,
        raw_multiplier,
        capped_multiplier,
        cap_applied: raw_multiplier > capped_multiplier,
    }
}
