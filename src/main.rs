// Main entry point - Dependency injection and server setup
use anyhow::Context;
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use superstore_dashboard::application::dashboard_service::DashboardService;
use superstore_dashboard::infrastructure::config::{load_dashboard_config, load_widgets_config};
use superstore_dashboard::infrastructure::csv_repository::CsvSalesRepository;
use superstore_dashboard::presentation::app_state::AppState;
use superstore_dashboard::presentation::handlers::{dashboard, filter_options, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;
    let widgets_config = load_widgets_config().context("Failed to load widgets configuration")?;

    // Load the base table once; a failure here ends the session
    let repository = CsvSalesRepository::new(&config.dataset.path, config.dataset.encoding);
    let dashboard_service =
        DashboardService::initialize(&repository, widgets_config, config.dashboard.clone())
            .await
            .inspect_err(|e| tracing::error!(kind = ?e.kind(), error = %e, "Dataset load failed"))
            .with_context(|| format!("Failed to load dataset from {}", repository.path().display()))?;

    let state = Arc::new(AppState { dashboard_service });

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting superstore-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/filters", get(filter_options))
        .route("/dashboard", get(dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
