//! DTOs for cache inspection endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::application::services::{CacheEntryInfo, CacheStats};

/// Query parameters for `GET /api/cache/keys`.
#[derive(Debug, Deserialize)]
pub struct KeysQuery {
    /// Glob-style pattern, `*` when absent.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    "*".to_string()
}

/// One key in a key listing.
#[derive(Debug, Serialize)]
pub struct CacheKeyItem {
    pub key: String,
    pub value: Option<String>,
    /// Seconds to live, `null` for keys without expiry.
    pub ttl: Option<u64>,
}

impl From<CacheEntryInfo> for CacheKeyItem {
    fn from(entry: CacheEntryInfo) -> Self {
        Self {
            key: entry.key,
            value: entry.value,
            ttl: entry.ttl,
        }
    }
}

/// Request body for `POST /api/cache/keys`.
#[derive(Debug, Deserialize, Validate)]
pub struct SetKeyRequest {
    #[validate(length(min = 1, max = 512))]
    pub key: String,

    pub value: String,

    /// Seconds to live; the key never expires when absent.
    #[validate(range(min = 1))]
    pub ttl: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SetKeyResponse {
    pub success: bool,
    pub key: String,
    pub value: String,
    pub ttl: Option<u64>,
}

/// Response of `GET /api/cache/stats`.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub connected: bool,
    pub state: &'static str,
    /// Number of keys, `null` while disconnected.
    #[serde(rename = "dbSize")]
    pub db_size: Option<u64>,
    pub info: BTreeMap<String, String>,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            connected: stats.connected,
            state: stats.state.label(),
            db_size: stats.db_size,
            info: stats.info,
        }
    }
}

/// A single cache entry with its raw value.
#[derive(Debug, Serialize)]
pub struct CacheEntryResponse {
    pub key: String,
    pub value: Option<String>,
    pub ttl: Option<u64>,
}

impl From<CacheEntryInfo> for CacheEntryResponse {
    fn from(entry: CacheEntryInfo) -> Self {
        Self {
            key: entry.key,
            value: entry.value,
            ttl: entry.ttl,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteKeyResponse {
    /// `true` if the key existed.
    pub success: bool,
    pub key: String,
}
