//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CacheStatus, CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable; `status` is `degraded` while the cache is down
/// - **503 Service Unavailable**: Database unreachable
///
/// # Components Checked
///
/// 1. **Database**: `SELECT NOW()`
/// 2. **Cache**: Connection state from the reconnect supervisor
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2026-03-01T12:00:00Z",
///   "checks": {
///     "database": {
///       "status": "ok",
///       "message": "Connected, server time 2026-03-01T12:00:00Z"
///     },
///     "cache": {
///       "status": "connected",
///       "state": "ready"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let cache_check = check_cache(&state);

    let db_healthy = db_check.status == "ok";
    let all_healthy = db_healthy && cache_check.status == "connected";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if db_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by asking for the server time.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.database.server_time().await {
        Ok(now) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, server time {}", now.to_rfc3339())),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
    }
}

/// Reports the cache connection state without touching the backend.
fn check_cache(state: &AppState) -> CacheStatus {
    let connection = state.cache.connection_state();
    CacheStatus {
        status: if connection.is_connected() {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
        state: connection.label().to_string(),
    }
}
