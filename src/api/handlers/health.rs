use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::AppState;
use crate::api::models::HealthResponse;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.predictions.model().is_loaded(),
    })
}
