//! Business logic services for the application layer.

pub mod cache_keys;
pub mod dashboard_service;
pub mod log_service;
pub mod query_cache;
pub mod threat_service;

pub use dashboard_service::DashboardService;
pub use log_service::LogService;
pub use query_cache::{CacheEntryInfo, CacheStats, Cached, QueryCache, Source};
pub use threat_service::ThreatService;
