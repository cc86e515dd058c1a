// HTTP request handlers
use crate::application::scene_renderer::SceneRenderer;
use crate::infrastructure::http_response::{accepts_brotli, document_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Page that shows the chart and reloads it every poll interval
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{}">
<title>Temperature</title>
<style>html, body {{ margin: 0; height: 100%; background: #000; }}</style>
</head>
<body>
<img src="/chart.svg" alt="" style="width: 100%; height: 100%;">
</body>
</html>
"#,
        state.refresh_secs
    ))
}

/// Current chart as SVG
pub async fn chart_svg(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    render_current(&state, &state.svg_renderer, accepts_brotli(&headers)).await
}

/// Current scene graph as JSON
pub async fn scene_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    render_current(&state, &state.json_renderer, accepts_brotli(&headers)).await
}

/// Latest forecast snapshot, or 503 until the first fetch succeeds
pub async fn current_forecast(State(state): State<Arc<AppState>>) -> Response {
    match state.widget_service.current_state().snapshot() {
        Some(snapshot) => Json((**snapshot).clone()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "loading").into_response(),
    }
}

async fn render_current(state: &AppState, renderer: &dyn SceneRenderer, compress: bool) -> Response {
    let scene = state.widget_service.scene_at(&Local::now());

    let body = match renderer.render(&scene) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Error rendering scene: {:#}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match document_response(body, renderer.content_type(), compress).await {
        Ok(response) => response.into_response(),
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::widget_service::{WidgetService, WidgetState, state_channel};
    use crate::domain::chart::ChartRenderer;
    use crate::domain::forecast::ForecastSnapshot;
    use crate::infrastructure::config::ChartSettings;
    use crate::infrastructure::json_renderer::JsonSceneRenderer;
    use crate::infrastructure::svg_renderer::SvgRenderer;
    use axum::http::header;
    use chrono::{Duration, Utc};
    use tokio::sync::watch;

    fn app() -> (Arc<AppState>, watch::Sender<WidgetState>) {
        let (tx, rx) = state_channel();
        let chart = ChartRenderer::new(ChartSettings::default().layout());
        let state = Arc::new(AppState {
            widget_service: WidgetService::new(rx, chart),
            svg_renderer: SvgRenderer,
            json_renderer: JsonSceneRenderer,
            refresh_secs: 30,
        });
        (state, tx)
    }

    fn publish(tx: &watch::Sender<WidgetState>) {
        let now = Utc::now();
        let times = (0..16).map(|i| now + Duration::hours(i)).collect();
        let snapshot =
            ForecastSnapshot::new(vec![58.0; 16], vec![63.0; 16], times, now).unwrap();
        tx.send_replace(WidgetState::Ready(Arc::new(snapshot)));
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_chart_shows_loading_then_chart() {
        let (state, tx) = app();

        let response = chart_svg(HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        let svg = body_text(response).await;
        assert!(svg.contains(">loading...</text>"));
        assert!(!svg.contains("<rect"));

        publish(&tx);
        let svg = body_text(chart_svg(HeaderMap::new(), State(state)).await).await;
        assert_eq!(svg.matches("<rect").count(), 32);
        assert!(svg.contains(">high: 63 (+5)</text>"));
    }

    #[tokio::test]
    async fn test_forecast_unavailable_while_loading() {
        let (state, tx) = app();

        let response = current_forecast(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        publish(&tx);
        let response = current_forecast(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["today"].as_array().unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_scene_json() {
        let (state, tx) = app();
        publish(&tx);

        let response = scene_json(HeaderMap::new(), State(state)).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["width"], 480.0);
        assert_eq!(body["primitives"][0]["kind"], "line");
    }

    #[tokio::test]
    async fn test_index_refreshes_with_poll_interval() {
        let (state, _tx) = app();
        let Html(page) = index(State(state)).await;
        assert!(page.contains(r#"content="30""#));
        assert!(page.contains(r#"src="/chart.svg""#));
    }
}
