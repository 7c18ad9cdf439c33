//! Aggregated dashboard counters.

use serde::{Deserialize, Serialize};

/// Threat counters over the last 24 hours.
///
/// `active_threats` counts threats still `detected` or `investigating`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_threats: i64,
    pub active_threats: i64,
    pub resolved_threats: i64,
    pub critical_threats: i64,
}
