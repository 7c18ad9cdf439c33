//! Core domain entities.
//!
//! Entities are plain data structures. They derive `Serialize`/`Deserialize`
//! because query results are cached as JSON snapshots.
//!
//! # Entity Types
//!
//! - [`Threat`] - A detected threat, with [`NewThreat`] for creation
//! - [`ThreatStat`] - Per type/severity counts
//! - [`SecurityLog`] - A security log entry
//! - [`DashboardMetrics`] - Aggregated threat counters

pub mod dashboard_metrics;
pub mod security_log;
pub mod threat;

pub use dashboard_metrics::DashboardMetrics;
pub use security_log::SecurityLog;
pub use threat::{NewThreat, SEVERITIES, Threat, ThreatStat};
