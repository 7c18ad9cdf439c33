//! Dashboard metrics.

use std::sync::Arc;

use super::cache_keys;
use super::query_cache::{Cached, QueryCache};
use crate::domain::entities::DashboardMetrics;
use crate::domain::repositories::ThreatRepository;
use crate::error::AppError;

/// Service for the dashboard's aggregated threat counters.
pub struct DashboardService {
    repository: Arc<dyn ThreatRepository>,
    cache: Arc<QueryCache>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn ThreatRepository>, cache: Arc<QueryCache>) -> Self {
        Self { repository, cache }
    }

    /// Threat counters for the last 24 hours, cached for 45 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn metrics(&self) -> Result<Cached<DashboardMetrics>, AppError> {
        self.cache
            .fetch_cached(
                cache_keys::DASHBOARD_METRICS,
                cache_keys::DASHBOARD_METRICS_TTL,
                || self.repository.dashboard_metrics(),
            )
            .await
    }
}
