// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_controller::DashboardController;
use crate::application::flight_repository::FlightRepository;
use crate::infrastructure::config::{load_settings, Settings};
use crate::infrastructure::remote_repository::RemoteFlightRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    clear_filters, export_csv, get_dashboard, health_check, load_dashboard, refresh_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings()?;
    let controller = Arc::new(build_controller(&settings)?);
    controller.initialize().await;

    let router = build_router(Arc::new(AppState { controller }));

    let addr: SocketAddr = settings
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", settings.server.bind))?;
    tracing::info!("Starting flight dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

fn build_controller(settings: &Settings) -> anyhow::Result<DashboardController> {
    let repository: Option<Arc<dyn FlightRepository>> = if settings.search.remote_enabled() {
        tracing::info!("Using flight search at {}", settings.search.base_url);
        Some(Arc::new(RemoteFlightRepository::new(
            &settings.search.base_url,
            Duration::from_secs(settings.search.timeout_secs),
        )?))
    } else {
        tracing::info!("No search base URL configured, running on sample data only");
        None
    };

    anyhow::ensure!(
        settings.dashboard.default_limit <= settings.dashboard.max_limit,
        "dashboard.default_limit ({}) exceeds dashboard.max_limit ({})",
        settings.dashboard.default_limit,
        settings.dashboard.max_limit
    );

    Ok(DashboardController::new(
        repository,
        settings.dashboard.default_limit,
        settings.dashboard.max_limit,
        settings.sample.seed,
    ))
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/load", post(load_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/clear", post(clear_filters))
        .route("/dashboard/export.csv", get(export_csv))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
