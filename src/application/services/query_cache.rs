//! Cache-aside query service.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::AppError;
use crate::infrastructure::cache::{
    CacheError, CacheFault, CacheOperation, CacheResult, CacheStore, ConnectionEvent,
    ConnectionMonitor, ConnectionState, FaultKind, FaultReporter, NullCache, ReconnectPolicy,
    TracingFaultReporter, supervise,
};

/// Where a query result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Database,
}

/// A query result tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cached<T> {
    pub data: T,
    pub source: Source,
}

/// A cache entry as seen by the inspection endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryInfo {
    pub key: String,
    pub value: Option<String>,
    /// Remaining time-to-live in seconds, `None` if the key has no expiry.
    pub ttl: Option<u64>,
}

/// Backend statistics as seen by the inspection endpoints.
///
/// `db_size` and `info` are only filled while the cache is connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub connected: bool,
    pub state: ConnectionState,
    pub db_size: Option<u64>,
    pub info: BTreeMap<String, String>,
}

/// Serves reads from the cache when possible and from the store otherwise.
///
/// The cache is an optimisation only: every cache failure (disconnected
/// backend, error, timeout, undecodable value) degrades to the store path and
/// is reported to the [`FaultReporter`]. Only store failures reach the caller.
///
/// # Lifecycle
///
/// - [`QueryCache::open`] spawns the reconnect supervisor for a real backend
/// - [`QueryCache::disabled`] runs in store-only mode
/// - [`QueryCache::close`] stops the supervisor and disables the fast path
pub struct QueryCache {
    store: Arc<dyn CacheStore>,
    monitor: Arc<ConnectionMonitor>,
    reporter: Arc<dyn FaultReporter>,
    op_timeout: Duration,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl QueryCache {
    /// Wraps a store whose connection state is driven by the caller.
    pub fn new(
        store: Arc<dyn CacheStore>,
        monitor: Arc<ConnectionMonitor>,
        reporter: Arc<dyn FaultReporter>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            store,
            monitor,
            reporter,
            op_timeout,
            supervisor: Mutex::new(None),
        }
    }

    /// Wraps `store` and spawns the task that connects it and keeps it connected.
    ///
    /// Must be called from within a tokio runtime. Returns immediately; until
    /// the first connection succeeds, reads go to the store.
    pub fn open(
        store: Arc<dyn CacheStore>,
        policy: ReconnectPolicy,
        reporter: Arc<dyn FaultReporter>,
        op_timeout: Duration,
    ) -> Self {
        let monitor = Arc::new(ConnectionMonitor::new(policy.max_attempts));
        let handle = tokio::spawn(supervise(store.clone(), monitor.clone(), policy));

        let cache = Self::new(store, monitor, reporter, op_timeout);
        if let Ok(mut supervisor) = cache.supervisor.lock() {
            *supervisor = Some(handle);
        }
        cache
    }

    /// Store-only mode: no backend, permanently disconnected.
    pub fn disabled() -> Self {
        Self::new(
            Arc::new(NullCache::new()),
            Arc::new(ConnectionMonitor::new(0)),
            Arc::new(TracingFaultReporter),
            Duration::from_millis(1),
        )
    }

    /// Stops the reconnect supervisor and marks the cache disconnected.
    pub fn close(&self) {
        if let Ok(mut supervisor) = self.supervisor.lock()
            && let Some(handle) = supervisor.take()
        {
            handle.abort();
        }
        self.monitor.apply(ConnectionEvent::Closed);
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.monitor.state()
    }

    pub fn is_connected(&self) -> bool {
        self.monitor.is_connected()
    }

    /// Pings the backend. `false` when disconnected or when the PING fails.
    pub async fn ping(&self) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.guarded(CacheOperation::Ping, None, self.store.ping())
            .await
            .is_some()
    }

    /// Returns the value cached under `key`, or loads it from the store and
    /// caches it for `ttl_seconds`.
    ///
    /// `load` is invoked at most once and only on a miss.
    ///
    /// # Errors
    ///
    /// Returns the error of `load` unchanged; nothing is cached in that case.
    /// Returns [`AppError::Internal`] for an empty key or a zero TTL.
    pub async fn fetch_cached<T, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        load: F,
    ) -> Result<Cached<T>, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if key.is_empty() || ttl_seconds == 0 {
            return Err(AppError::internal(
                "Invalid cache request",
                json!({ "key": key, "ttl_seconds": ttl_seconds }),
            ));
        }

        if let Some(data) = self.lookup(key).await {
            return Ok(Cached {
                data,
                source: Source::Cache,
            });
        }

        let data = load().await?;
        self.populate(key, &data, ttl_seconds).await;

        Ok(Cached {
            data,
            source: Source::Database,
        })
    }

    /// Deletes every key in `keys`. Best effort: failures are reported and
    /// otherwise ignored, and nothing happens while disconnected.
    pub async fn invalidate<I>(&self, keys: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if !self.is_connected() {
            debug!("Cache disconnected, skipping invalidation");
            return;
        }

        for key in keys {
            let key = key.as_ref();
            if let Some(deleted) = self
                .guarded(CacheOperation::Delete, Some(key), self.store.delete(key))
                .await
            {
                debug!(key, deleted, "Cache invalidated");
            }
        }
    }

    /// Lists keys matching `pattern` with their raw value and remaining TTL.
    ///
    /// A key that expires between listing and reading keeps its place with
    /// `value: None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the cache is disconnected or fails.
    pub async fn list_keys(&self, pattern: &str) -> Result<Vec<CacheEntryInfo>, AppError> {
        let keys = self.inspect_op(self.store.keys(pattern)).await?;

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let value = self.inspect_op(self.store.get(&key)).await?;
            let ttl = self.inspect_op(self.store.ttl(&key)).await?;
            entries.push(CacheEntryInfo { key, value, ttl });
        }
        Ok(entries)
    }

    /// Returns the raw value and TTL of `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the cache is disconnected or fails.
    pub async fn entry(&self, key: &str) -> Result<Option<CacheEntryInfo>, AppError> {
        let Some(value) = self.inspect_op(self.store.get(key)).await? else {
            return Ok(None);
        };
        let ttl = self.inspect_op(self.store.ttl(key)).await?;

        Ok(Some(CacheEntryInfo {
            key: key.to_string(),
            value: Some(value),
            ttl,
        }))
    }

    /// Deletes a single key, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the cache is disconnected or fails.
    pub async fn remove(&self, key: &str) -> Result<bool, AppError> {
        let deleted = self.inspect_op(self.store.delete(key)).await?;
        Ok(deleted > 0)
    }

    /// Stores a raw `value` under `key`, expiring after `ttl_seconds` or never
    /// when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty key or a zero TTL and
    /// [`AppError::Unavailable`] when the cache is disconnected or fails.
    pub async fn put(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), AppError> {
        if key.is_empty() || ttl_seconds == Some(0) {
            return Err(AppError::bad_request(
                "Invalid cache entry",
                json!({ "key": key, "ttl": ttl_seconds }),
            ));
        }

        match ttl_seconds {
            Some(ttl) => self.inspect_op(self.store.set(key, value, ttl)).await,
            None => self.inspect_op(self.store.set_persistent(key, value)).await,
        }
    }

    /// Reports the connection state and, while connected, the backend key
    /// count and server information.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when a connected backend fails to answer.
    pub async fn stats(&self) -> Result<CacheStats, AppError> {
        let state = self.connection_state();
        if !state.is_connected() {
            return Ok(CacheStats {
                connected: false,
                state,
                db_size: None,
                info: BTreeMap::new(),
            });
        }

        let db_size = self.inspect_op(self.store.dbsize()).await?;
        let info = self.inspect_op(self.store.info()).await?;

        Ok(CacheStats {
            connected: true,
            state,
            db_size: Some(db_size),
            info,
        })
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.is_connected() {
            record_lookup("skipped");
            return None;
        }

        let raw = match self
            .guarded(CacheOperation::Get, Some(key), self.store.get(key))
            .await
        {
            Some(Some(raw)) => raw,
            Some(None) => {
                record_lookup("miss");
                return None;
            }
            None => {
                record_lookup("error");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(data) => {
                record_lookup("hit");
                Some(data)
            }
            Err(e) => {
                self.reporter.report(CacheFault::new(
                    CacheOperation::Get,
                    Some(key),
                    FaultKind::Serialization,
                    e.to_string(),
                ));
                record_lookup("error");
                None
            }
        }
    }

    async fn populate<T: Serialize>(&self, key: &str, data: &T, ttl_seconds: u64) {
        if !self.is_connected() {
            return;
        }

        let value = match serde_json::to_string(data) {
            Ok(value) => value,
            Err(e) => {
                self.reporter.report(CacheFault::new(
                    CacheOperation::Set,
                    Some(key),
                    FaultKind::Serialization,
                    e.to_string(),
                ));
                return;
            }
        };

        self.guarded(
            CacheOperation::Set,
            Some(key),
            self.store.set(key, &value, ttl_seconds),
        )
        .await;
    }

    /// Runs a cache operation under the operation timeout, reporting any failure.
    async fn guarded<T>(
        &self,
        operation: CacheOperation,
        key: Option<&str>,
        fut: impl Future<Output = CacheResult<T>>,
    ) -> Option<T> {
        match self.bounded(fut).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.reporter.report(CacheFault::from_error(operation, key, &e));
                None
            }
        }
    }

    async fn inspect_op<T>(
        &self,
        fut: impl Future<Output = CacheResult<T>>,
    ) -> Result<T, AppError> {
        if !self.is_connected() {
            return Err(AppError::unavailable(
                "Cache unavailable",
                json!({ "state": self.connection_state().label() }),
            ));
        }

        self.bounded(fut).await.map_err(|e| {
            AppError::unavailable("Cache operation failed", json!({ "reason": e.to_string() }))
        })
    }

    async fn bounded<T>(&self, fut: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .unwrap_or(Err(CacheError::Timeout))
    }
}

fn record_lookup(outcome: &'static str) {
    metrics::counter!("cache_lookups_total", "outcome" => outcome).increment(1);
}
