use axum::{
    Router,
    body::Body,
    http::{Response, StatusCode, header},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::handlers::{
    AppState,
    health::health,
    predictions::{predict_price, predict_price_batch, predict_rush, rush_heatmap},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/predict-rush", post(predict_rush))
        .route("/predict-price", post(predict_price))
        .route("/predict-price-batch", post(predict_price_batch))
        .route("/rush-heatmap", post(rush_heatmap))
        .layer(CatchPanicLayer::custom(internal_error))
        .with_state(state)
}

fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    log::error!("Prediction handler panicked: {}", detail);

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"error":"prediction failed"}"#))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::AppConfig;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppState::new(AppConfig::new())))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_predict_rush_endpoint() {
        let (status, body) = post_json(
            app(),
            "/predict-rush",
            json!({"venueId": "v1", "courtId": "c1", "dateTime": "2024-06-01T19:00:00Z", "durationHours": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["durationHours"], 2);
        assert!(body["factors"]["venueBias"].is_number());
        assert!(body["rushScore"].as_f64().unwrap() <= 1.0);
    }

    #[tokio::test]
    async fn test_numeric_and_date_only_timestamps_are_honoured() {
        let app = app();
        let (_, rfc) = post_json(
            app.clone(),
            "/predict-price",
            json!({"venueId": "v1", "courtId": "c1", "dateTime": "2024-06-01T19:00:00Z"}),
        )
        .await;
        let (status, millis) = post_json(
            app.clone(),
            "/predict-price",
            json!({"venueId": "v1", "courtId": "c1", "dateTime": 1717268400000_i64}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rfc, millis);

        let (status, heatmap) = post_json(app, "/rush-heatmap", json!({"weekStart": "2024-06-03"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(heatmap["weekStart"], "2024-06-03T00:00:00Z");
    }

    #[tokio::test]
    async fn test_predict_price_tolerates_malformed_numbers() {
        let (status, body) = post_json(
            app(),
            "/predict-price",
            json!({"venueId": "v1", "courtId": "c1", "basePrice": "lots", "k": "x", "cap": null}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basePrice"], 500.0);
        assert!(body["suggestedPrice"].as_i64().unwrap() <= 650);
    }

    #[tokio::test]
    async fn test_batch_endpoint_rejects_non_array() {
        let (status, body) = post_json(app(), "/predict-price-batch", json!({"items": "nope"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "items must be an array");
    }

    #[tokio::test]
    async fn test_batch_endpoint_keeps_item_order() {
        let items = json!([
            {"dateTime": "2024-06-01T08:00:00Z", "basePrice": 400, "durationHours": 1},
            {"dateTime": "2024-06-01T19:00:00Z", "basePrice": 400, "durationHours": 2},
            {"dateTime": "2024-06-01T03:00:00Z", "basePrice": 400, "durationHours": 1},
        ]);
        let (status, body) = post_json(
            app(),
            "/predict-price-batch",
            json!({"venueId": "v1", "courtId": "c1", "items": items}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["dateTime"], "2024-06-01T19:00:00Z");
        assert_eq!(items[1]["durationHours"], 2);
        assert_eq!(items[1]["rushScore"], 1.0);
        assert_eq!(items[2]["rushScore"], 0.0);
    }

    #[tokio::test]
    async fn test_health_reports_heuristic_mode() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok", "modelLoaded": false}));
    }
}
