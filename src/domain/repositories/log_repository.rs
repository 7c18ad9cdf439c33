//! Repository trait for security log access.

use crate::domain::entities::SecurityLog;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the security event log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Returns up to `limit` log entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_recent(&self, limit: i64) -> Result<Vec<SecurityLog>, AppError>;
}
