//! Handlers for cache inspection endpoints.
//!
//! These operate on the cache itself, so they answer 503 while it is
//! disconnected instead of falling back to the store. The stats endpoint is
//! the exception and reports the disconnected state instead.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::cache::{
    CacheEntryResponse, CacheKeyItem, CacheStatsResponse, DeleteKeyResponse, KeysQuery,
    SetKeyRequest, SetKeyResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists cached keys matching a glob pattern.
///
/// # Endpoint
///
/// `GET /api/cache/keys?pattern=threats:*`
///
/// # Response
///
/// ```json
/// [{ "key": "threats:latest", "value": "[...]", "ttl": 27 }]
/// ```
pub async fn list_keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<Vec<CacheKeyItem>>, AppError> {
    let entries = state.cache.list_keys(&query.pattern).await?;
    Ok(Json(entries.into_iter().map(CacheKeyItem::from).collect()))
}

/// Returns the raw cached value of a key.
///
/// # Endpoint
///
/// `GET /api/cache/keys/{key}`
///
/// # Errors
///
/// Returns 404 Not Found if the key is not cached.
pub async fn get_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheEntryResponse>, AppError> {
    let entry = state
        .cache
        .entry(&key)
        .await?
        .ok_or_else(|| AppError::not_found("Key not found", json!({ "key": key })))?;

    Ok(Json(entry.into()))
}

/// Deletes a single cached key.
///
/// # Endpoint
///
/// `DELETE /api/cache/keys/{key}`
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteKeyResponse>, AppError> {
    let success = state.cache.remove(&key).await?;
    tracing::info!(key = %key, existed = success, "Cache key deleted");

    Ok(Json(DeleteKeyResponse { success, key }))
}

/// Stores a raw value under a key.
///
/// # Endpoint
///
/// `POST /api/cache/keys`
///
/// # Request Body
///
/// ```json
/// { "key": "feature:flags", "value": "{\"beta\":true}", "ttl": 300 }
/// ```
///
/// Without `ttl` the key never expires.
///
/// # Errors
///
/// Returns 400 Bad Request for an empty key or a zero TTL.
pub async fn set_key_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetKeyRequest>,
) -> Result<Json<SetKeyResponse>, AppError> {
    payload.validate()?;

    state
        .cache
        .put(&payload.key, &payload.value, payload.ttl)
        .await?;
    tracing::info!(key = %payload.key, ttl = ?payload.ttl, "Cache key set");

    Ok(Json(SetKeyResponse {
        success: true,
        key: payload.key,
        value: payload.value,
        ttl: payload.ttl,
    }))
}

/// Reports cache connectivity, key count and backend server information.
///
/// # Endpoint
///
/// `GET /api/cache/stats`
///
/// # Response
///
/// ```json
/// {
///   "connected": true,
///   "state": "ready",
///   "dbSize": 4,
///   "info": { "redis_version": "7.2.4", "used_memory_human": "1.02M" }
/// }
/// ```
///
/// While disconnected: `connected: false`, `dbSize: null` and an empty `info`.
pub async fn cache_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<CacheStatsResponse>, AppError> {
    let stats = state.cache.stats().await?;
    Ok(Json(stats.into()))
}
