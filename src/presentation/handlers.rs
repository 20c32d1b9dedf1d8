// HTTP request handlers
use crate::application::error::DashboardError;
use crate::domain::dashboard::DashboardView;
use crate::infrastructure::http_response::{accepts_brotli, csv_response, json_response};
use crate::infrastructure::json_mapper::dashboard_to_dto;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /dashboard/load`: `fromAirport`, `toAirport`, `date` (YYYY-MM-DD), `limit`.
/// Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    #[serde(default)]
    pub from_airport: Option<String>,
    #[serde(default)]
    pub to_airport: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::EmptyExport => StatusCode::CONFLICT,
            DashboardError::InvalidAirport(_)
            | DashboardError::SameAirport(_)
            | DashboardError::InvalidLimit { .. } => StatusCode::BAD_REQUEST,
            DashboardError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_body(status, self.to_string())
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

async fn view_response(view: DashboardView, headers: &HeaderMap) -> Response {
    let dto = dashboard_to_dto(view);
    match json_response(&dto, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.controller.dashboard().await;
    view_response(view, &headers).await
}

/// Load with new filters
pub async fn load_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadRequest>,
) -> Response {
    let date = match request.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                return error_body(StatusCode::BAD_REQUEST, format!("Invalid date: {}", d));
            }
        },
        None => None,
    };

    match state
        .controller
        .load_filtered(
            request.from_airport.as_deref(),
            request.to_airport.as_deref(),
            date,
            request.limit,
        )
        .await
    {
        Ok(view) => view_response(view, &headers).await,
        Err(e) => {
            tracing::info!("Rejected dashboard load: {}", e);
            e.into_response()
        }
    }
}

/// Reload with the active filters
pub async fn refresh_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.controller.refresh().await;
    view_response(view, &headers).await
}

/// Reset filters and reload sample data
pub async fn clear_filters(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.controller.clear_filters().await;
    view_response(view, &headers).await
}

/// Download the current flights as CSV
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    match state.controller.export_csv().await {
        Ok(export) => match csv_response(export) {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => e.into_response(),
    }
}
