//! PostgreSQL liveness probe.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::DatabaseHealth;
use crate::error::AppError;

/// Runs `SELECT NOW()` against the pool.
pub struct PgDatabaseHealth {
    pool: Arc<PgPool>,
}

impl PgDatabaseHealth {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealth for PgDatabaseHealth {
    async fn server_time(&self) -> Result<DateTime<Utc>, AppError> {
        let (now,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(now)
    }
}
