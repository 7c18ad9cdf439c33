mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::{Value, json};
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_list_threats_cold_then_cached() {
    let ctx = TestContext::connected();

    let first = ctx.server.get("/api/threats").await;
    first.assert_status_ok();
    let first = first.json::<Value>();
    assert_eq!(first["source"], "database");
    assert_eq!(first["data"].as_array().unwrap().len(), 4);
    assert_eq!(first["data"][0]["id"], 1);

    let second = ctx.server.get("/api/threats").await.json::<Value>();
    assert_eq!(second["source"], "cache");
    assert_eq!(second["data"], first["data"]);

    assert_eq!(ctx.threats.latest_calls.load(Ordering::SeqCst), 1);
    assert!(ctx.cached("threats:latest").await.is_some());
}

#[tokio::test]
async fn test_threat_stats_last_day() {
    let ctx = TestContext::connected();

    let json = ctx.server.get("/api/threats/stats").await.json::<Value>();
    assert_eq!(json["source"], "database");

    let stats = json["data"].as_array().unwrap();
    assert_eq!(stats.len(), 3);

    let ddos = stats.iter().find(|s| s["threat_type"] == "ddos").unwrap();
    assert_eq!(ddos["count"], 1);
    assert_eq!(ddos["resolved_count"], 0);

    let cached = ctx.server.get("/api/threats/stats").await.json::<Value>();
    assert_eq!(cached["source"], "cache");
    assert_eq!(ctx.threats.stats_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_threat_returns_created() {
    let ctx = TestContext::connected();

    let response = ctx
        .server
        .post("/api/threats")
        .json(&json!({
            "threat_type": "port_scan",
            "severity": "low",
            "source_ip": "192.0.2.44",
            "description": "Sequential SYN probes"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["id"], 5);
    assert_eq!(json["threat_type"], "port_scan");
    assert_eq!(json["status"], "detected");
    assert_eq!(json["source_ip"], "192.0.2.44");
    assert!(json["target_ip"].is_null());
}

#[tokio::test]
async fn test_create_threat_invalidates_cached_queries() {
    let ctx = TestContext::connected();

    ctx.server.get("/api/threats").await;
    ctx.server.get("/api/threats/stats").await;
    ctx.server.get("/api/dashboard/metrics").await;
    ctx.server.get("/api/logs").await;

    for key in ["threats:latest", "threats:stats", "dashboard:metrics", "logs:50"] {
        assert!(ctx.cached(key).await.is_some(), "{key} not cached");
    }

    ctx.server
        .post("/api/threats")
        .json(&json!({ "threat_type": "malware", "severity": "critical" }))
        .await
        .assert_status(StatusCode::CREATED);

    for key in ["threats:latest", "threats:stats", "dashboard:metrics"] {
        assert!(ctx.cached(key).await.is_none(), "{key} still cached");
    }
    assert!(ctx.cached("logs:50").await.is_some());

    let threats = ctx.server.get("/api/threats").await.json::<Value>();
    assert_eq!(threats["source"], "database");
    assert_eq!(threats["data"].as_array().unwrap().len(), 5);
    assert_eq!(threats["data"][0]["threat_type"], "malware");

    let metrics = ctx
        .server
        .get("/api/dashboard/metrics")
        .await
        .json::<Value>();
    assert_eq!(metrics["source"], "database");
    assert_eq!(metrics["critical_threats"], 2);
}

#[tokio::test]
async fn test_create_threat_rejects_unknown_severity() {
    let ctx = TestContext::connected();

    let response = ctx
        .server
        .post("/api/threats")
        .json(&json!({ "threat_type": "malware", "severity": "catastrophic" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(
        json["error"]["details"]["fields"]
            .as_array()
            .unwrap()
            .contains(&json!("severity"))
    );
}

#[tokio::test]
async fn test_create_threat_rejects_invalid_ip() {
    let ctx = TestContext::connected();

    ctx.server
        .post("/api/threats")
        .json(&json!({
            "threat_type": "malware",
            "severity": "high",
            "source_ip": "999.1.1.1"
        }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejected_create_keeps_cache() {
    let ctx = TestContext::connected();
    ctx.server.get("/api/threats").await;

    ctx.server
        .post("/api/threats")
        .json(&json!({ "threat_type": "", "severity": "high" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(ctx.cached("threats:latest").await.is_some());
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let ctx = TestContext::connected();
    ctx.threats.fail(true);

    let response = ctx.server.get("/api/threats").expect_failure().await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"]["code"], "internal_error");
    assert!(ctx.cached("threats:latest").await.is_none());
}

#[tokio::test]
async fn test_cached_result_survives_store_outage() {
    let ctx = TestContext::connected();
    ctx.server.get("/api/threats").await;

    ctx.threats.fail(true);

    let json = ctx.server.get("/api/threats").await.json::<Value>();
    assert_eq!(json["source"], "cache");
}

#[tokio::test]
async fn test_reads_fall_back_to_database_when_cache_lost() {
    let ctx = TestContext::connected();
    ctx.server.get("/api/threats").await;
    ctx.lose_cache();

    let json = ctx.server.get("/api/threats").await.json::<Value>();
    assert_eq!(json["source"], "database");
    assert_eq!(ctx.threats.latest_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_disconnected_cache_serves_from_database() {
    let ctx = TestContext::disconnected();

    for _ in 0..3 {
        let json = ctx.server.get("/api/threats").await.json::<Value>();
        assert_eq!(json["source"], "database");
    }

    ctx.server
        .post("/api/threats")
        .json(&json!({ "threat_type": "phishing", "severity": "medium" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(ctx.threats.latest_calls.load(Ordering::SeqCst), 3);
    assert!(ctx.cached("threats:latest").await.is_none());
}
