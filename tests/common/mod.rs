#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use security_dashboard::api::handlers::health_handler;
use security_dashboard::api::routes::api_routes;
use security_dashboard::application::services::QueryCache;
use security_dashboard::domain::entities::{
    DashboardMetrics, NewThreat, SecurityLog, Threat, ThreatStat,
};
use security_dashboard::domain::repositories::{DatabaseHealth, LogRepository, ThreatRepository};
use security_dashboard::error::AppError;
use security_dashboard::infrastructure::cache::{
    CacheStore, ConnectionEvent, ConnectionMonitor, InMemoryCache, TracingFaultReporter,
};
use security_dashboard::state::AppState;

/// In-memory stand-in for the `security.threats` table.
#[derive(Default)]
pub struct FakeThreatRepository {
    threats: Mutex<Vec<Threat>>,
    pub latest_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub metrics_calls: AtomicUsize,
    pub failing: AtomicBool,
}

impl FakeThreatRepository {
    pub fn with_threats(threats: Vec<Threat>) -> Self {
        Self {
            threats: Mutex::new(threats),
            ..Self::default()
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::internal("Database error", json!({})))
        } else {
            Ok(())
        }
    }

    fn last_day(&self) -> Vec<Threat> {
        let since = Utc::now() - ChronoDuration::hours(24);
        self.threats
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.detected_at >= since)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ThreatRepository for FakeThreatRepository {
    async fn list_latest(&self, limit: i64) -> Result<Vec<Threat>, AppError> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut threats = self.threats.lock().unwrap().clone();
        threats.sort_by(|a, b| b.detected_at.cmp(&a.detected_at));
        threats.truncate(limit as usize);
        Ok(threats)
    }

    async fn stats_last_day(&self) -> Result<Vec<ThreatStat>, AppError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut stats: Vec<ThreatStat> = Vec::new();
        for threat in self.last_day() {
            let resolved = i64::from(threat.status == "resolved");
            match stats
                .iter_mut()
                .find(|s| s.threat_type == threat.threat_type && s.severity == threat.severity)
            {
                Some(stat) => {
                    stat.count += 1;
                    stat.resolved_count += resolved;
                }
                None => stats.push(ThreatStat {
                    threat_type: threat.threat_type,
                    severity: threat.severity,
                    count: 1,
                    resolved_count: resolved,
                }),
            }
        }
        Ok(stats)
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, AppError> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let threats = self.last_day();
        let count = |f: &dyn Fn(&Threat) -> bool| threats.iter().filter(|t| f(t)).count() as i64;

        Ok(DashboardMetrics {
            total_threats: threats.len() as i64,
            active_threats: count(&|t| t.status == "detected" || t.status == "investigating"),
            resolved_threats: count(&|t| t.status == "resolved"),
            critical_threats: count(&|t| t.severity == "critical"),
        })
    }

    async fn create(&self, new_threat: NewThreat) -> Result<Threat, AppError> {
        self.check()?;

        let mut threats = self.threats.lock().unwrap();
        let threat = Threat {
            id: threats.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            threat_type: new_threat.threat_type,
            severity: new_threat.severity,
            status: "detected".to_string(),
            source_ip: new_threat.source_ip,
            target_ip: new_threat.target_ip,
            description: new_threat.description,
            detected_at: Utc::now(),
            resolved_at: None,
        };
        threats.push(threat.clone());
        Ok(threat)
    }
}

/// In-memory stand-in for `logs.security_logs`.
#[derive(Default)]
pub struct FakeLogRepository {
    logs: Vec<SecurityLog>,
    pub requested_limits: Mutex<Vec<i64>>,
}

impl FakeLogRepository {
    pub fn with_logs(count: i64) -> Self {
        let now = Utc::now();
        let logs = (1..=count)
            .map(|id| SecurityLog {
                id,
                timestamp: now - ChronoDuration::seconds(id),
                log_level: if id % 5 == 0 { "warning" } else { "info" }.to_string(),
                source: "firewall".to_string(),
                event_type: "connection_blocked".to_string(),
                source_ip: Some(format!("203.0.113.{}", id % 250)),
                message: format!("Blocked inbound connection #{}", id),
                metadata: Some(json!({ "port": 22 })),
            })
            .collect();

        Self {
            logs,
            requested_limits: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LogRepository for FakeLogRepository {
    async fn list_recent(&self, limit: i64) -> Result<Vec<SecurityLog>, AppError> {
        self.requested_limits.lock().unwrap().push(limit);
        Ok(self.logs.iter().take(limit as usize).cloned().collect())
    }
}

/// Database probe that can be switched off.
pub struct FakeDatabase {
    pub healthy: AtomicBool,
}

impl Default for FakeDatabase {
    fn default() -> Self {
        Self {
            healthy: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl DatabaseHealth for FakeDatabase {
    async fn server_time(&self) -> Result<DateTime<Utc>, AppError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(Utc::now())
        } else {
            Err(AppError::internal("Database error", json!({})))
        }
    }
}

pub fn threat(id: i64, threat_type: &str, severity: &str, status: &str, minutes_ago: i64) -> Threat {
    Threat {
        id,
        threat_type: threat_type.to_string(),
        severity: severity.to_string(),
        status: status.to_string(),
        source_ip: Some("198.51.100.7".to_string()),
        target_ip: Some("10.0.0.5".to_string()),
        description: None,
        detected_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
        resolved_at: None,
    }
}

pub fn sample_threats() -> Vec<Threat> {
    vec![
        threat(1, "ddos", "high", "detected", 5),
        threat(2, "sql_injection", "critical", "investigating", 30),
        threat(3, "brute_force", "medium", "resolved", 90),
        threat(4, "ddos", "high", "resolved", 60 * 48),
    ]
}

/// Everything a handler test needs to drive and observe the service.
pub struct TestContext {
    pub server: TestServer,
    pub threats: Arc<FakeThreatRepository>,
    pub logs: Arc<FakeLogRepository>,
    pub database: Arc<FakeDatabase>,
    pub store: Arc<InMemoryCache>,
    pub monitor: Arc<ConnectionMonitor>,
    pub cache: Arc<QueryCache>,
}

impl TestContext {
    /// Service with an in-memory cache in the `Ready` state.
    pub fn connected() -> Self {
        Self::build(true)
    }

    /// Service whose cache never connected.
    pub fn disconnected() -> Self {
        Self::build(false)
    }

    fn build(connected: bool) -> Self {
        let threats = Arc::new(FakeThreatRepository::with_threats(sample_threats()));
        let logs = Arc::new(FakeLogRepository::with_logs(120));
        let database = Arc::new(FakeDatabase::default());

        let store = Arc::new(InMemoryCache::default());
        let monitor = Arc::new(ConnectionMonitor::new(3));
        if connected {
            monitor.apply(ConnectionEvent::Connect);
            monitor.apply(ConnectionEvent::Established);
        }
        let cache = Arc::new(QueryCache::new(
            store.clone(),
            monitor.clone(),
            Arc::new(TracingFaultReporter),
            Duration::from_millis(250),
        ));

        let state = AppState::new(
            threats.clone(),
            logs.clone(),
            database.clone(),
            cache.clone(),
        );

        Self {
            server: create_test_server(state),
            threats,
            logs,
            database,
            store,
            monitor,
            cache,
        }
    }

    /// Simulates the backend dropping: the supervisor would feed `Lost`.
    pub fn lose_cache(&self) {
        self.monitor.apply(ConnectionEvent::Lost);
    }

    pub async fn cached(&self, key: &str) -> Option<String> {
        self.store.get(key).await.unwrap()
    }
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state);

    TestServer::new(app).unwrap()
}

/// Inserts a threat detected `minutes_ago` and returns its id.
pub async fn insert_threat(
    pool: &sqlx::PgPool,
    threat_type: &str,
    severity: &str,
    status: &str,
    minutes_ago: i64,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO security.threats (threat_type, severity, status, source_ip, detected_at)
        VALUES ($1, $2, $3, '198.51.100.7'::inet, NOW() - make_interval(mins => $4::int))
        RETURNING id::bigint
        "#,
    )
    .bind(threat_type)
    .bind(severity)
    .bind(status)
    .bind(minutes_ago)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a security log entry written `seconds_ago` and returns its id.
pub async fn insert_log(
    pool: &sqlx::PgPool,
    message: &str,
    source_ip: Option<&str>,
    metadata: Option<serde_json::Value>,
    seconds_ago: i64,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO logs.security_logs
            (log_level, source, event_type, source_ip, message, metadata, "timestamp")
        VALUES ('warning', 'ids', 'port_scan', $1::inet, $2, $3,
                NOW() - make_interval(secs => $4::double precision))
        RETURNING id::bigint
        "#,
    )
    .bind(source_ip)
    .bind(message)
    .bind(metadata)
    .bind(seconds_ago as f64)
    .fetch_one(pool)
    .await
    .unwrap()
}
