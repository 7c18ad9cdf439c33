//! Repository trait for threat data access.

use crate::domain::entities::{DashboardMetrics, NewThreat, Threat, ThreatStat};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for threat records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgThreatRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreatRepository: Send + Sync {
    /// Returns up to `limit` threats, most recently detected first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_latest(&self, limit: i64) -> Result<Vec<Threat>, AppError>;

    /// Returns per (type, severity) counts for threats detected in the last 24 hours.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn stats_last_day(&self) -> Result<Vec<ThreatStat>, AppError>;

    /// Returns the aggregated dashboard counters for the last 24 hours.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, AppError>;

    /// Inserts a threat and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_threat: NewThreat) -> Result<Threat, AppError>;
}
