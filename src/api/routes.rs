//! API route configuration.

use crate::api::handlers::{
    cache_stats_handler, create_threat_handler, dashboard_metrics_handler, db_test_handler,
    delete_key_handler, get_key_handler, list_keys_handler, list_threats_handler,
    recent_logs_handler, set_key_handler, threat_stats_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /threats`            - Latest threats (cached 30s)
/// - `POST   /threats`            - Record a threat, invalidating derived caches
/// - `GET    /threats/stats`      - Per type/severity counts (cached 60s)
/// - `GET    /logs`               - Recent security logs (cached 15s per limit)
/// - `GET    /dashboard/metrics`  - Dashboard counters (cached 45s)
/// - `GET    /db-test`            - Database server time
/// - `GET    /cache/stats`        - Cache connectivity and backend statistics
/// - `GET    /cache/keys`         - List cached keys with values
/// - `POST   /cache/keys`         - Store a raw value, optionally with a TTL
/// - `GET    /cache/keys/{key}`   - Inspect a cached entry
/// - `DELETE /cache/keys/{key}`   - Evict a cached entry
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/threats",
            get(list_threats_handler).post(create_threat_handler),
        )
        .route("/threats/stats", get(threat_stats_handler))
        .route("/logs", get(recent_logs_handler))
        .route("/dashboard/metrics", get(dashboard_metrics_handler))
        .route("/db-test", get(db_test_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/keys", get(list_keys_handler).post(set_key_handler))
        .route(
            "/cache/keys/{key}",
            get(get_key_handler).delete(delete_key_handler),
        )
}
