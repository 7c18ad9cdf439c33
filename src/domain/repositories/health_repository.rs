//! Database liveness probe.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Probe used by the health check and `/api/db-test`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Returns the database server's current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database cannot be reached.
    async fn server_time(&self) -> Result<DateTime<Utc>, AppError>;
}
