//! Handler for security log endpoint.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::DataResponse;
use crate::api::dto::logs::LogsQuery;
use crate::domain::entities::SecurityLog;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the most recent security log entries.
///
/// # Endpoint
///
/// `GET /api/logs?limit=50`
///
/// `limit` defaults to 50 and is clamped to `1..=1000`.
pub async fn recent_logs_handler(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<DataResponse<Vec<SecurityLog>>>, AppError> {
    let logs = state.log_service.recent(query.limit).await?;
    Ok(Json(logs.into()))
}
