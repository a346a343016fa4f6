use crate::config::settings::AppConfig;
use crate::services::prediction::PredictionService;

pub mod health;
pub mod predictions;

pub struct AppState {
    pub predictions: PredictionService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            predictions: PredictionService::new(config),
        }
    }
}
