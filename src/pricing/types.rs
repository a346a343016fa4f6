use crate::config::settings::PricingSettings;

/// Pricing inputs after request defaults have been resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTerms {
    pub base_price: f64,
    pub benchmark_price: f64,
    pub k: f64,
    pub cap: f64,
}

impl PriceTerms {
    /// Missing, non-finite or out-of-range values fall back to the configured defaults
    pub fn resolve(
        base_price: Option<f64>,
        benchmark_price: Option<f64>,
        k: Option<f64>,
        cap: Option<f64>,
        settings: &PricingSettings,
    ) -> Self {
        let base_price = positive(base_price).unwrap_or(settings.default_base_price);
        Self {
            base_price,
            benchmark_price: positive(benchmark_price).unwrap_or(base_price),
            k: non_negative(k).unwrap_or(settings.default_k),
            cap: non_negative(cap).unwrap_or(settings.default_cap),
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSuggestion {
    pub suggested_price: i64,
    pub effective_rush: f64,
    pub raw_multiplier: f64,
    pub capped_multiplier: f64,
    pub cap_applied: bool,
}
