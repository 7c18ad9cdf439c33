//! Process-local cache store using moka.

use super::service::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Serialized JSON value
    data: String,
    /// `None` for entries stored without expiry
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory cache store with per-entry TTL.
///
/// Useful for single-instance deployments (`CACHE_BACKEND=memory`) and as the
/// reference backend in tests. Expiry is checked on read against the tokio
/// clock, so tests running with a paused clock can advance past a TTL
/// deterministically. Physical removal of expired entries is lazy.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
    max_capacity: u64,
}

impl InMemoryCache {
    /// Creates a store holding at most `max_capacity` entries.
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(max_capacity).build(),
            max_capacity,
        }
    }

    async fn insert(&self, key: &str, value: &str, expires_at: Option<Instant>) {
        let entry = CacheEntry {
            data: value.to_string(),
            expires_at,
        };
        self.cache.insert(key.to_string(), entry).await;
    }

    fn live_count(&self) -> u64 {
        let now = Instant::now();
        self.cache
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .count() as u64
    }

    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.cache.get(key).await?;
        if entry.is_expired(Instant::now()) {
            self.cache.invalidate(key).await;
            return None;
        }
        Some(entry)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn connect(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|entry| entry.data))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.insert(key, value, Some(expires_at)).await;
        Ok(())
    }

    async fn set_persistent(&self, key: &str, value: &str) -> CacheResult<()> {
        self.insert(key, value, None).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<u64> {
        let existed = self.live_entry(key).await.is_some();
        self.cache.invalidate(key).await;
        Ok(u64::from(existed))
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let matcher = glob_regex(pattern)?;
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, entry)| !entry.is_expired(now) && matcher.is_match(key))
            .map(|(key, _)| key.to_string())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<u64>> {
        let now = Instant::now();
        Ok(self
            .live_entry(key)
            .await
            .and_then(|entry| entry.expires_at)
            .map(|at| (at - now).as_secs()))
    }

    async fn dbsize(&self) -> CacheResult<u64> {
        Ok(self.live_count())
    }

    async fn info(&self) -> CacheResult<BTreeMap<String, String>> {
        Ok(BTreeMap::from([
            ("backend".to_string(), "memory".to_string()),
            ("keys".to_string(), self.live_count().to_string()),
            ("max_capacity".to_string(), self.max_capacity.to_string()),
        ]))
    }
}

/// Compiles a Redis-style glob (`*` any run, `?` one character) into an
/// anchored regex. Every other character matches literally.
fn glob_regex(pattern: &str) -> CacheResult<Regex> {
    let mut source = String::with_capacity(pattern.len() + 6);
    source.push_str("(?s)^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            c => source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');

    Regex::new(&source).map_err(|e| CacheError::Operation(format!("Invalid key pattern: {}", e)))
}
