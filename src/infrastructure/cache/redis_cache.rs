//! Redis-backed cache store.

use super::service::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Redis cache store for query snapshots.
///
/// Construction does no I/O; the connection is established by
/// [`CacheStore::connect`], which the reconnect supervisor calls at startup
/// and after every lost connection. Until then every operation fails with
/// [`CacheError::Unavailable`].
///
/// Errors are returned to the caller unchanged. The cache-aside layer decides
/// that they are recoverable.
pub struct RedisCache {
    client: Client,
    connection: RwLock<Option<ConnectionManager>>,
}

impl RedisCache {
    /// Parses the Redis URL without connecting.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid.
    pub fn new(redis_url: &str) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        Ok(Self {
            client,
            connection: RwLock::new(None),
        })
    }

    async fn conn(&self) -> CacheResult<ConnectionManager> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or(CacheError::Unavailable)
    }
}

fn operation_error(e: redis::RedisError) -> CacheError {
    CacheError::Operation(e.to_string())
}

/// Parses the `INFO` reply: `# Section` headers and blank lines are skipped,
/// every other line is `field:value`.
fn parse_info(raw: &str) -> BTreeMap<String, String> {
    raw.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn connect(&self) -> CacheResult<()> {
        info!("Connecting to Redis");

        let mut manager = ConnectionManager::new(self.client.clone())
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        manager
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        *self.connection.write().await = Some(manager);

        info!("✓ Connected to Redis");
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        let value = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(operation_error)?;

        match value {
            Some(_) => debug!("Cache HIT: {}", key),
            None => debug!("Cache MISS: {}", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(operation_error)?;

        debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }

    async fn set_persistent(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(operation_error)?;

        debug!("Cache SET: {} (no expiry)", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<u64> {
        let mut conn = self.conn().await?;
        let deleted = conn.del::<_, u64>(key).await.map_err(operation_error)?;

        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", key);
        }

        Ok(deleted)
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        conn.ping::<()>().await.map_err(operation_error)
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        let mut keys = conn
            .keys::<_, Vec<String>>(pattern)
            .await
            .map_err(operation_error)?;
        keys.sort();
        Ok(keys)
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<u64>> {
        let mut conn = self.conn().await?;
        // -2: missing key, -1: no expiry
        let ttl = conn.ttl::<_, i64>(key).await.map_err(operation_error)?;
        Ok(u64::try_from(ttl).ok())
    }

    async fn dbsize(&self) -> CacheResult<u64> {
        let mut conn = self.conn().await?;
        redis::cmd("DBSIZE")
            .query_async::<u64>(&mut conn)
            .await
            .map_err(operation_error)
    }

    async fn info(&self) -> CacheResult<BTreeMap<String, String>> {
        let mut conn = self.conn().await?;
        let raw = redis::cmd("INFO")
            .query_async::<String>(&mut conn)
            .await
            .map_err(operation_error)?;
        Ok(parse_info(&raw))
    }
}
