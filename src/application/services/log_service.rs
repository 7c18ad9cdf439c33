//! Security log queries.

use std::sync::Arc;

use super::cache_keys;
use super::query_cache::{Cached, QueryCache};
use crate::domain::entities::SecurityLog;
use crate::domain::repositories::LogRepository;
use crate::error::AppError;

pub const DEFAULT_LOG_LIMIT: i64 = 50;
pub const MAX_LOG_LIMIT: i64 = 1000;

/// Service for reading recent security logs.
pub struct LogService {
    repository: Arc<dyn LogRepository>,
    cache: Arc<QueryCache>,
}

impl LogService {
    pub fn new(repository: Arc<dyn LogRepository>, cache: Arc<QueryCache>) -> Self {
        Self { repository, cache }
    }

    /// Returns the most recent logs, newest first.
    ///
    /// `limit` defaults to 50 and is clamped to `1..=1000`; each distinct
    /// limit is cached under its own key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn recent(&self, limit: Option<i64>) -> Result<Cached<Vec<SecurityLog>>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT);

        self.cache
            .fetch_cached(&cache_keys::logs(limit), cache_keys::LOGS_TTL, || {
                self.repository.list_recent(limit)
            })
            .await
    }
}
