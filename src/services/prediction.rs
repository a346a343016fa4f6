use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Timelike};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration as StdDuration;

use crate::api::errors::ApiError;
use crate::api::models::{
    HeatmapCell, HeatmapRequest, HeatmapResponse, PriceBatchItem, PriceBatchItemResponse,
    PriceBatchRequest, PriceBatchResponse, PriceRequest, PriceResponse, RushRequest, RushResponse,
};
use crate::api::parsers::timestamps::{timestamp_or_now, truncate_to_hour};
use crate::cache::{PredictionKey, ResponseCache};
use crate::config::settings::AppConfig;
use crate::features::encode_features;
use crate::model::ModelAdapter;
use crate::pricing::{PriceTerms, suggest_price};
use crate::rush::{RushBreakdown, RushInput, heuristic_score, normalize_batch, score_slot};

const DEFAULT_DURATION_HOURS: u32 = 1;
const HEATMAP_DAYS: u32 = 7;

/// One time slot of a batch, after request defaults are applied
#[derive(Debug, Clone)]
pub struct SlotRequest {
    pub at: DateTime<FixedOffset>,
    pub base_price: f64,
}

/// A batch slot's heuristic terms and its normalized model or heuristic score
#[derive(Debug, Clone, Copy)]
pub struct ScoredSlot {
    pub breakdown: RushBreakdown,
    pub normalized: f64,
}

/// Owns the prediction cache and the optional model session
pub struct PredictionService {
    config: AppConfig,
    cache: ResponseCache,
    model: ModelAdapter,
}

impl PredictionService {
    pub fn new(config: AppConfig) -> Self {
        let cache = ResponseCache::new(StdDuration::from_secs(config.cache.ttl_secs));
        let model = ModelAdapter::from_settings(&config.model);
        Self::with_parts(config, cache, model)
    }

    pub fn with_parts(config: AppConfig, cache: ResponseCache, model: ModelAdapter) -> Self {
        Self {
            config,
            cache,
            model,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn model(&self) -> &ModelAdapter {
        &self.model
    }

    /// Warm up the model session so the first batch request does not pay for it
    pub async fn warm_up(&self) {
        if self.config.model.artifact().is_some() {
            let loaded = self.model.ensure_loaded().await;
            info!("Model-backed batch scoring {}", if loaded { "enabled" } else { "disabled" });
        }
    }

    pub fn predict_rush(&self, request: &RushRequest) -> Result<Value, ApiError> {
        let venue_id = request.venue_id.as_deref().unwrap_or_default();
        let court_id = request.court_id.as_deref().unwrap_or_default();
        let at = timestamp_or_now(request.date_time);
        let duration_hours = request.duration_hours.unwrap_or(DEFAULT_DURATION_HOURS);
        let outdoor = request.outdoor.unwrap_or(false);

        let key = PredictionKey::rush(venue_id, court_id, at, duration_hours, outdoor);
        self.cached(key.to_string(), || {
            let breakdown = heuristic_score(&RushInput {
                at,
                venue_id,
                court_id,
                outdoor,
            });
            RushResponse {
                rush_score: breakdown.raw,
                factors: breakdown.factors,
                duration_hours,
            }
        })
    }

    pub fn predict_price(&self, request: &PriceRequest) -> Result<Value, ApiError> {
        let venue_id = request.venue_id.as_deref().unwrap_or_default();
        let court_id = request.court_id.as_deref().unwrap_or_default();
        let at = timestamp_or_now(request.date_time);
        let duration_hours = request.duration_hours.unwrap_or(DEFAULT_DURATION_HOURS);
        let outdoor = request.outdoor.unwrap_or(false);
        let terms = PriceTerms::resolve(
            request.base_price,
            request.benchmark_price,
            request.k,
            request.cap,
            &self.config.pricing,
        );

        let key = PredictionKey {
            kind: "price",
            base_price: Some(terms.base_price),
            benchmark_price: Some(terms.benchmark_price),
            k: Some(terms.k),
            cap: Some(terms.cap),
            ..PredictionKey::rush(venue_id, court_id, at, duration_hours, outdoor)
        };
        self.cached(key.to_string(), || {
            let breakdown = heuristic_score(&RushInput {
                at,
                venue_id,
                court_id,
                outdoor,
            });
            let suggestion = suggest_price(&terms, breakdown.raw, &self.config.pricing);
            debug!(
                "Price multiplier {:.4} (uncapped {:.4}) for {}",
                suggestion.capped_multiplier, suggestion.raw_multiplier, key
            );
            PriceResponse {
                suggested_price: suggestion.suggested_price,
                rush_score: breakdown.raw,
                effective_rush: suggestion.effective_rush,
                cap_applied: suggestion.cap_applied,
                factors: breakdown.factors,
                base_price: terms.base_price,
                duration_hours,
            }
        })
    }

    pub async fn predict_price_batch(&self, request: &PriceBatchRequest) -> Result<PriceBatchResponse, ApiError> {
        let items = request
            .items
            .as_array()
            .ok_or_else(|| ApiError::BadRequest("items must be an array".to_string()))?;

        let venue_id = request.venue_id.as_deref().unwrap_or_default();
        let court_id = request.court_id.as_deref().unwrap_or_default();
        let outdoor = request.outdoor.unwrap_or(false);

        let parsed: Vec<PriceBatchItem> = items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
            .collect();
        let resolved: Vec<(SlotRequest, PriceTerms, u32)> = parsed
            .iter()
            .map(|item| {
                let terms = PriceTerms::resolve(
                    item.base_price,
                    request.benchmark_price,
                    request.k,
                    request.cap,
                    &self.config.pricing,
                );
                let slot = SlotRequest {
                    at: timestamp_or_now(item.date_time),
                    base_price: terms.base_price,
                };
                (slot, terms, item.duration_hours.unwrap_or(DEFAULT_DURATION_HOURS))
            })
            .collect();

        let slots: Vec<SlotRequest> = resolved.iter().map(|(slot, _, _)| slot.clone()).collect();
        let scored = self.score_slots(venue_id, court_id, outdoor, &slots).await;

        let items = resolved
            .iter()
            .zip(scored)
            .map(|((slot, terms, duration_hours), scored)| {
                let suggestion = suggest_price(terms, scored.normalized, &self.config.pricing);
                PriceBatchItemResponse {
                    date_time: format_timestamp(&slot.at),
                    suggested_price: suggestion.suggested_price,
                    rush_score: scored.normalized,
                    effective_rush: suggestion.effective_rush,
                    cap_applied: suggestion.cap_applied,
                    factors: scored.breakdown.factors,
                    base_price: terms.base_price,
                    duration_hours: *duration_hours,
                }
            })
            .collect();

        Ok(PriceBatchResponse { items })
    }

    pub async fn rush_heatmap(&self, request: &HeatmapRequest) -> HeatmapResponse {
        let venue_id = request.venue_id.as_deref().unwrap_or_default();
        let court_id = request.court_id.as_deref().unwrap_or_default();
        let outdoor = request.outdoor.unwrap_or(false);
        let base_price = PriceTerms::resolve(request.base_price, None, None, None, &self.config.pricing).base_price;
        let week_start = truncate_to_hour(timestamp_or_now(request.week_start));

        let slots: Vec<SlotRequest> = (0..HEATMAP_DAYS * 24)
            .map(|offset| SlotRequest {
                at: week_start + Duration::hours(offset as i64),
                base_price,
            })
            .collect();
        let scored = self.score_slots(venue_id, court_id, outdoor, &slots).await;

        let cells = slots
            .iter()
            .zip(scored)
            .enumerate()
            .map(|(offset, (slot, scored))| HeatmapCell {
                day_offset: offset as u32 / 24,
                hour: slot.at.hour(),
                date_time: format_timestamp(&slot.at),
                rush_score: scored.normalized,
            })
            .collect();

        HeatmapResponse {
            week_start: format_timestamp(&week_start),
            cells,
        }
    }

    /// Raw scores come from the model when it answers for every slot,
    /// otherwise from the slot heuristic; the batch is then normalized.
    pub async fn score_slots(
        &self,
        venue_id: &str,
        court_id: &str,
        outdoor: bool,
        slots: &[SlotRequest],
    ) -> Vec<ScoredSlot> {
        let inputs: Vec<RushInput<'_>> = slots
            .iter()
            .map(|slot| RushInput {
                at: slot.at,
                venue_id,
                court_id,
                outdoor,
            })
            .collect();
        let breakdowns: Vec<RushBreakdown> = inputs.iter().map(|input| score_slot(input)).collect();

        let raw = match self.model_scores(&inputs, slots).await {
            Some(scores) => scores,
            None => breakdowns.iter().map(|b| b.raw).collect(),
        };
        let normalized = normalize_batch(&raw, &self.config.normalization);

        breakdowns
            .into_iter()
            .zip(normalized)
            .map(|(breakdown, normalized)| ScoredSlot { breakdown, normalized })
            .collect()
    }

    async fn model_scores(&self, inputs: &[RushInput<'_>], slots: &[SlotRequest]) -> Option<Vec<f64>> {
        let features: Vec<_> = inputs
            .iter()
            .zip(slots)
            .map(|(input, slot)| {
                encode_features(input.slot(), input.venue_id, input.court_id, slot.base_price, input.outdoor)
            })
            .collect();
        let scores = self.model.predict_batch(&features).await?;
        if scores.len() != features.len() {
            debug!("Model returned {} scores for {} slots", scores.len(), features.len());
            return None;
        }
        Some(scores)
    }

    fn cached<T, F>(&self, key: String, compute: F) -> Result<Value, ApiError>
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let value = serde_json::to_value(compute())?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }
}

fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
