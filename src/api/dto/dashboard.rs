//! DTOs for dashboard endpoint.

use serde::Serialize;

use crate::application::services::{Cached, Source};
use crate::domain::entities::DashboardMetrics;

/// Dashboard counters with the provenance field next to them.
///
/// ```json
/// {
///   "total_threats": 12,
///   "active_threats": 5,
///   "resolved_threats": 6,
///   "critical_threats": 2,
///   "source": "database"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct DashboardMetricsResponse {
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
    pub source: Source,
}

impl From<Cached<DashboardMetrics>> for DashboardMetricsResponse {
    fn from(cached: Cached<DashboardMetrics>) -> Self {
        Self {
            metrics: cached.data,
            source: cached.source,
        }
    }
}
