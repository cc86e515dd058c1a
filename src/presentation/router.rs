use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_svg, current_forecast, health_check, index, scene_json};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/chart.svg", get(chart_svg))
        .route("/scene.json", get(scene_json))
        .route("/forecast", get(current_forecast))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
