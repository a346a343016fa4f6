use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parsers::lenient::{bool_or_none, f64_or_none, hours_or_none, string_or_none, timestamp_or_none};
use crate::rush::RushFactors;

// --- Requests ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RushRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub venue_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub court_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp_or_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "hours_or_none")]
    pub duration_hours: Option<u32>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub outdoor: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub venue_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub court_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp_or_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub benchmark_price: Option<f64>,
    #[serde(default, deserialize_with = "hours_or_none")]
    pub duration_hours: Option<u32>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub k: Option<f64>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub cap: Option<f64>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub outdoor: Option<bool>,
}

/// `items` stays untyped so a non-array can be rejected explicitly
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBatchRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub venue_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub court_id: Option<String>,
    #[serde(default)]
    pub items: Value,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub benchmark_price: Option<f64>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub k: Option<f64>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub cap: Option<f64>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub outdoor: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBatchItem {
    #[serde(default, deserialize_with = "timestamp_or_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "hours_or_none")]
    pub duration_hours: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub venue_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub court_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp_or_none")]
    pub week_start: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "f64_or_none")]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub outdoor: Option<bool>,
}

// --- Responses ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RushResponse {
    pub rush_score: f64,
    pub factors: RushFactors,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub suggested_price: i64,
    pub rush_score: f64,
    pub effective_rush: f64,
    pub cap_applied: bool,
    pub factors: RushFactors,
    pub base_price: f64,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBatchItemResponse {
    pub date_time: String,
    pub suggested_price: i64,
    pub rush_score: f64,
    pub effective_rush: f64,
    pub cap_applied: bool,
    pub factors: RushFactors,
    pub base_price: f64,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBatchResponse {
    pub items: Vec<PriceBatchItemResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub day_offset: u32,
    pub hour: u32,
    pub date_time: String,
    pub rush_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapResponse {
    pub week_start: String,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}
