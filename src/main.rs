// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::forecast_service::ForecastService;
use crate::application::poller::spawn_poller;
use crate::application::widget_service::{WidgetService, state_channel};
use crate::domain::chart::ChartRenderer;
use crate::infrastructure::config::load_widget_config;
use crate::infrastructure::json_renderer::JsonSceneRenderer;
use crate::infrastructure::open_meteo::OpenMeteoProvider;
use crate::infrastructure::svg_renderer::SvgRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_widget_config().context("failed to load widget configuration")?;

    // Create provider (infrastructure layer)
    let provider = Arc::new(OpenMeteoProvider::new(
        config.provider.base_url.clone(),
        config.location.latitude,
        config.location.longitude,
    ));

    // Create services (application layer)
    let forecast_service = ForecastService::new(provider, config.chart.window()?);
    let (state_tx, state_rx) = state_channel();
    let widget_service =
        WidgetService::new(state_rx, ChartRenderer::new(config.chart.layout()));

    // Poll until the handle is dropped at the end of main
    let _poller = spawn_poller(
        forecast_service,
        config.provider.poll_interval(),
        state_tx,
    );

    // Create application state
    let state = Arc::new(AppState {
        widget_service,
        svg_renderer: SvgRenderer,
        json_renderer: JsonSceneRenderer,
        refresh_secs: config.provider.poll_interval_secs,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.listen_addr))?;
    tracing::info!(
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        "Starting temperature widget on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
