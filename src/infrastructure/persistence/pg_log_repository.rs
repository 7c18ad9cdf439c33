//! PostgreSQL implementation of log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::SecurityLog;
use crate::domain::repositories::LogRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct SecurityLogRow {
    id: i64,
    timestamp: DateTime<Utc>,
    log_level: String,
    source: String,
    event_type: String,
    source_ip: Option<String>,
    message: String,
    metadata: Option<Value>,
}

/// PostgreSQL repository for the `logs.security_logs` table.
pub struct PgLogRepository {
    pool: Arc<PgPool>,
}

impl PgLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogRepository for PgLogRepository {
    async fn list_recent(&self, limit: i64) -> Result<Vec<SecurityLog>, AppError> {
        let rows: Vec<SecurityLogRow> = sqlx::query_as(
            r#"
            SELECT
                id::bigint AS id,
                "timestamp"::timestamptz AS "timestamp",
                log_level,
                source,
                event_type,
                host(source_ip) AS source_ip,
                message,
                metadata::jsonb AS metadata
            FROM logs.security_logs
            ORDER BY "timestamp" DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SecurityLog {
                id: r.id,
                timestamp: r.timestamp,
                log_level: r.log_level,
                source: r.source,
                event_type: r.event_type,
                source_ip: r.source_ip,
                message: r.message,
                metadata: r.metadata,
            })
            .collect())
    }
}
