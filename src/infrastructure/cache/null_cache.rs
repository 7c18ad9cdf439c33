//! Cache store used when no cache backend is configured.

use super::service::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

/// A cache store that has no backend.
///
/// Every operation fails with [`CacheError::Unavailable`]. The service never
/// reaches these calls in practice because a `NullCache` is paired with a
/// connection monitor that stays disconnected, so requests take the
/// store-only path.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Tests exercising the store-only path
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCache {
    async fn connect(&self) -> CacheResult<()> {
        Err(CacheError::Unavailable)
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Unavailable)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Err(CacheError::Unavailable)
    }

    async fn set_persistent(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Err(CacheError::Unavailable)
    }

    async fn delete(&self, _key: &str) -> CacheResult<u64> {
        Err(CacheError::Unavailable)
    }

    async fn ping(&self) -> CacheResult<()> {
        Err(CacheError::Unavailable)
    }

    async fn keys(&self, _pattern: &str) -> CacheResult<Vec<String>> {
        Err(CacheError::Unavailable)
    }

    async fn ttl(&self, _key: &str) -> CacheResult<Option<u64>> {
        Err(CacheError::Unavailable)
    }

    async fn dbsize(&self) -> CacheResult<u64> {
        Err(CacheError::Unavailable)
    }

    async fn info(&self) -> CacheResult<BTreeMap<String, String>> {
        Err(CacheError::Unavailable)
    }
}
