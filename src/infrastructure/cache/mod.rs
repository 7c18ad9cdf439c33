//! Cache backends and connection management.
//!
//! Provides a [`CacheStore`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed store
//! - [`InMemoryCache`] - Process-local store with per-entry TTL
//! - [`NullCache`] - No backend (store-only mode)
//!
//! Connection health is tracked by the state machine in [`connection`] and
//! driven by the background task in [`supervisor`]. Absorbed failures are
//! reported through [`fault`].

pub mod connection;
pub mod fault;
mod in_memory_cache;
mod null_cache;
mod redis_cache;
mod service;
pub mod supervisor;

pub use connection::{ConnectionEvent, ConnectionMonitor, ConnectionState};
pub use fault::{CacheFault, CacheOperation, FaultKind, FaultReporter, TracingFaultReporter};
pub use in_memory_cache::InMemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheStore};
pub use supervisor::{ReconnectPolicy, supervise};
