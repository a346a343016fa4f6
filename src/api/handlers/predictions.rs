use axum::{extract::State, response::Json};
use serde_json::Value;
use std::sync::Arc;

use super::AppState;
use crate::api::errors::ApiError;
use crate::api::models::{
    HeatmapRequest, HeatmapResponse, PriceBatchRequest, PriceBatchResponse, PriceRequest, RushRequest,
};

pub async fn predict_rush(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RushRequest>,
) -> Result<Json<Value>, ApiError> {
    state.predictions.predict_rush(&request).map(Json)
}

pub async fn predict_price(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PriceRequest>,
) -> Result<Json<Value>, ApiError> {
    state.predictions.predict_price(&request).map(Json)
}

pub async fn predict_price_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PriceBatchRequest>,
) -> Result<Json<PriceBatchResponse>, ApiError> {
    let response = state.predictions.predict_price_batch(&request).await?;
    log::debug!("Priced {} batch slots", response.items.len());
    Ok(Json(response))
}

pub async fn rush_heatmap(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HeatmapRequest>,
) -> Json<HeatmapResponse> {
    Json(state.predictions.rush_heatmap(&request).await)
}
