//! Handler for dashboard metrics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::dashboard::DashboardMetricsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Aggregated threat counters for the last 24 hours.
///
/// # Endpoint
///
/// `GET /api/dashboard/metrics`
///
/// The counters are returned at the top level alongside `source`.
pub async fn dashboard_metrics_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardMetricsResponse>, AppError> {
    let metrics = state.dashboard_service.metrics().await?;
    Ok(Json(metrics.into()))
}
