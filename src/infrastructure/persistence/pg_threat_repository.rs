//! PostgreSQL implementation of threat repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{DashboardMetrics, NewThreat, Threat, ThreatStat};
use crate::domain::repositories::ThreatRepository;
use crate::error::AppError;

/// Columns selected for a [`Threat`]. IPs are read with `host()` so a plain
/// address comes back without its `/32` netmask; timestamps are normalized to
/// `timestamptz`.
const THREAT_COLUMNS: &str = r#"
    id::bigint AS id,
    threat_type,
    severity,
    status,
    host(source_ip) AS source_ip,
    host(target_ip) AS target_ip,
    description,
    detected_at::timestamptz AS detected_at,
    resolved_at::timestamptz AS resolved_at
"#;

#[derive(FromRow)]
struct ThreatRow {
    id: i64,
    threat_type: String,
    severity: String,
    status: String,
    source_ip: Option<String>,
    target_ip: Option<String>,
    description: Option<String>,
    detected_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl From<ThreatRow> for Threat {
    fn from(row: ThreatRow) -> Self {
        Threat {
            id: row.id,
            threat_type: row.threat_type,
            severity: row.severity,
            status: row.status,
            source_ip: row.source_ip,
            target_ip: row.target_ip,
            description: row.description,
            detected_at: row.detected_at,
            resolved_at: row.resolved_at,
        }
    }
}

#[derive(FromRow)]
struct ThreatStatRow {
    threat_type: String,
    severity: String,
    count: i64,
    resolved_count: i64,
}

#[derive(FromRow)]
struct MetricsRow {
    total_threats: i64,
    active_threats: i64,
    resolved_threats: i64,
    critical_threats: i64,
}

/// PostgreSQL repository for the `security.threats` table.
pub struct PgThreatRepository {
    pool: Arc<PgPool>,
}

impl PgThreatRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreatRepository for PgThreatRepository {
    async fn list_latest(&self, limit: i64) -> Result<Vec<Threat>, AppError> {
        let sql = format!(
            "SELECT {THREAT_COLUMNS} FROM security.threats ORDER BY detected_at DESC LIMIT $1"
        );

        let rows: Vec<ThreatRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Threat::from).collect())
    }

    async fn stats_last_day(&self) -> Result<Vec<ThreatStat>, AppError> {
        let rows: Vec<ThreatStatRow> = sqlx::query_as(
            r#"
            SELECT
                threat_type,
                severity,
                COUNT(*)::bigint AS count,
                COUNT(*) FILTER (WHERE status = 'resolved')::bigint AS resolved_count
            FROM security.threats
            WHERE detected_at >= NOW() - INTERVAL '24 hours'
            GROUP BY threat_type, severity
            ORDER BY count DESC, threat_type, severity
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ThreatStat {
                threat_type: r.threat_type,
                severity: r.severity,
                count: r.count,
                resolved_count: r.resolved_count,
            })
            .collect())
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, AppError> {
        let row: MetricsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*)::bigint AS total_threats,
                COUNT(*) FILTER (WHERE status IN ('detected', 'investigating'))::bigint
                    AS active_threats,
                COUNT(*) FILTER (WHERE status = 'resolved')::bigint AS resolved_threats,
                COUNT(*) FILTER (WHERE severity = 'critical')::bigint AS critical_threats
            FROM security.threats
            WHERE detected_at >= NOW() - INTERVAL '24 hours'
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(DashboardMetrics {
            total_threats: row.total_threats,
            active_threats: row.active_threats,
            resolved_threats: row.resolved_threats,
            critical_threats: row.critical_threats,
        })
    }

    async fn create(&self, new_threat: NewThreat) -> Result<Threat, AppError> {
        let sql = format!(
            r#"
            INSERT INTO security.threats (threat_type, severity, source_ip, target_ip, description)
            VALUES ($1, $2, $3::inet, $4::inet, $5)
            RETURNING {THREAT_COLUMNS}
            "#
        );

        let row: ThreatRow = sqlx::query_as(&sql)
            .bind(new_threat.threat_type)
            .bind(new_threat.severity)
            .bind(new_threat.source_ip)
            .bind(new_threat.target_ip)
            .bind(new_threat.description)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }
}
