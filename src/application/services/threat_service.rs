//! Threat queries and creation.

use std::sync::Arc;

use validator::Validate;

use super::cache_keys;
use super::query_cache::{Cached, QueryCache};
use crate::domain::entities::{NewThreat, Threat, ThreatStat};
use crate::domain::repositories::ThreatRepository;
use crate::error::AppError;

/// Number of threats returned by [`ThreatService::latest`].
pub const LATEST_THREATS_LIMIT: i64 = 100;

/// Service for reading and recording threats.
///
/// Reads go through the [`QueryCache`]; writes invalidate every cached query
/// derived from the threats table before returning.
pub struct ThreatService {
    repository: Arc<dyn ThreatRepository>,
    cache: Arc<QueryCache>,
}

impl ThreatService {
    pub fn new(repository: Arc<dyn ThreatRepository>, cache: Arc<QueryCache>) -> Self {
        Self { repository, cache }
    }

    /// The 100 most recently detected threats.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn latest(&self) -> Result<Cached<Vec<Threat>>, AppError> {
        self.cache
            .fetch_cached(
                cache_keys::THREATS_LATEST,
                cache_keys::THREATS_LATEST_TTL,
                || self.repository.list_latest(LATEST_THREATS_LIMIT),
            )
            .await
    }

    /// Per type/severity counts over the last 24 hours.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats(&self) -> Result<Cached<Vec<ThreatStat>>, AppError> {
        self.cache
            .fetch_cached(
                cache_keys::THREATS_STATS,
                cache_keys::THREATS_STATS_TTL,
                || self.repository.stats_last_day(),
            )
            .await
    }

    /// Validates and stores a new threat.
    ///
    /// Cached threat lists, statistics and dashboard metrics are invalidated
    /// after the insert succeeds, so the next read reflects the new row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input is invalid.
    /// Returns [`AppError::Internal`] on database errors; the cache is left untouched.
    pub async fn create(&self, new_threat: NewThreat) -> Result<Threat, AppError> {
        new_threat.validate()?;

        let threat = self.repository.create(new_threat).await?;
        self.cache.invalidate(cache_keys::THREAT_DERIVED).await;

        tracing::info!(
            id = threat.id,
            threat_type = %threat.threat_type,
            severity = %threat.severity,
            "Threat recorded"
        );

        Ok(threat)
    }
}
