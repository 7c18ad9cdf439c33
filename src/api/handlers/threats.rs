//! Handlers for threat endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::DataResponse;
use crate::api::dto::threat::CreateThreatRequest;
use crate::domain::entities::{Threat, ThreatStat};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the 100 most recently detected threats.
///
/// # Endpoint
///
/// `GET /api/threats`
///
/// # Response
///
/// ```json
/// { "data": [{ "id": 1, "threat_type": "ddos", ... }], "source": "cache" }
/// ```
pub async fn list_threats_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Threat>>>, AppError> {
    let threats = state.threat_service.latest().await?;
    Ok(Json(threats.into()))
}

/// Threat counts per type and severity over the last 24 hours.
///
/// # Endpoint
///
/// `GET /api/threats/stats`
pub async fn threat_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<ThreatStat>>>, AppError> {
    let stats = state.threat_service.stats().await?;
    Ok(Json(stats.into()))
}

/// Records a new threat.
///
/// # Endpoint
///
/// `POST /api/threats`
///
/// # Request Body
///
/// ```json
/// {
///   "threat_type": "sql_injection",
///   "severity": "critical",
///   "source_ip": "198.51.100.23",
///   "target_ip": "10.0.0.8",
///   "description": "UNION SELECT in login form"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn create_threat_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateThreatRequest>,
) -> Result<(StatusCode, Json<Threat>), AppError> {
    let threat = state.threat_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(threat)))
}
