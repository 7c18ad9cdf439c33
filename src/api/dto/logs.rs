//! DTOs for security log endpoint.

use serde::Deserialize;

/// Query parameters for `GET /api/logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Number of entries to return; defaults to 50, clamped to `1..=1000`.
    pub limit: Option<i64>,
}
