//! Cache store trait and error types.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No cache backend is configured or connected.
    #[error("Cache unavailable")]
    Unavailable,

    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),

    /// The backend did not answer within the operation timeout.
    #[error("Cache operation timed out")]
    Timeout,
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Raw key-value operations of a cache backend.
///
/// Unlike the cache-aside layer built on top of it, implementations report
/// every failure through [`CacheError`]; deciding whether a failure is fatal is
/// left to the caller (see [`crate::application::services::QueryCache`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed store
/// - [`crate::infrastructure::cache::InMemoryCache`] - process-local store with per-entry TTL
/// - [`crate::infrastructure::cache::NullCache`] - no backend at all
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Establishes (or re-establishes) the backend connection.
    ///
    /// Called by the reconnect supervisor; implementations must be safe to call
    /// repeatedly.
    async fn connect(&self) -> CacheResult<()>;

    /// Returns the raw value stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Stores `value` under `key` without an expiry.
    async fn set_persistent(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Deletes `key` and returns the number of removed entries.
    async fn delete(&self, key: &str) -> CacheResult<u64>;

    /// Checks that the backend answers.
    async fn ping(&self) -> CacheResult<()>;

    /// Lists keys matching a glob-style `pattern` (`*` wildcard).
    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>>;

    /// Remaining time-to-live of `key` in seconds.
    ///
    /// `None` when the key is absent or has no expiry.
    async fn ttl(&self, key: &str) -> CacheResult<Option<u64>>;

    /// Number of keys held by the backend.
    async fn dbsize(&self) -> CacheResult<u64>;

    /// Backend server information as `field -> value` pairs.
    async fn info(&self) -> CacheResult<BTreeMap<String, String>>;
}
