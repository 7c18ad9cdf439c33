mod common;

use common::insert_log;
use security_dashboard::domain::repositories::{DatabaseHealth, LogRepository};
use security_dashboard::infrastructure::persistence::{PgDatabaseHealth, PgLogRepository};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test(migrations = "tests/migrations")]
async fn test_list_recent_newest_first_with_limit(pool: PgPool) {
    for i in 0..5 {
        insert_log(&pool, &format!("event {}", i), None, None, 60 - i * 10).await;
    }

    let repo = PgLogRepository::new(Arc::new(pool));
    let logs = repo.list_recent(3).await.unwrap();

    let messages: Vec<&str> = logs.iter().map(|l| l.message.as_str()).collect();
    assert_eq!(messages, vec!["event 4", "event 3", "event 2"]);
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_list_recent_reads_metadata_and_ip(pool: PgPool) {
    let metadata = json!({ "ports": [22, 80, 443], "scanner": "nmap" });
    let id = insert_log(&pool, "port scan", Some("203.0.113.9"), Some(metadata.clone()), 1).await;
    insert_log(&pool, "bare", None, None, 30).await;

    let repo = PgLogRepository::new(Arc::new(pool));
    let logs = repo.list_recent(50).await.unwrap();

    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].id, id);
    assert_eq!(logs[0].log_level, "warning");
    assert_eq!(logs[0].source, "ids");
    assert_eq!(logs[0].event_type, "port_scan");
    assert_eq!(logs[0].source_ip.as_deref(), Some("203.0.113.9"));
    assert_eq!(logs[0].metadata, Some(metadata));

    assert_eq!(logs[1].source_ip, None);
    assert_eq!(logs[1].metadata, None);
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_list_recent_empty_table(pool: PgPool) {
    let repo = PgLogRepository::new(Arc::new(pool));

    assert!(repo.list_recent(50).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_database_health_reports_server_time(pool: PgPool) {
    let health = PgDatabaseHealth::new(Arc::new(pool));

    let server_time = health.server_time().await.unwrap();

    let drift = (chrono::Utc::now() - server_time).num_seconds().abs();
    assert!(drift < 60);
}
