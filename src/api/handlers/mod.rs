//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod cache;
pub mod dashboard;
pub mod health;
pub mod logs;
pub mod threats;

pub use cache::{
    cache_stats_handler, delete_key_handler, get_key_handler, list_keys_handler, set_key_handler,
};
pub use dashboard::dashboard_metrics_handler;
pub use db_test::db_test_handler;
pub use health::health_handler;
pub use logs::recent_logs_handler;
pub use threats::{create_threat_handler, list_threats_handler, threat_stats_handler};
