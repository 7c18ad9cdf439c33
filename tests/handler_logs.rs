mod common;

use common::TestContext;
use serde_json::Value;

#[tokio::test]
async fn test_logs_default_limit() {
    let ctx = TestContext::connected();

    let response = ctx.server.get("/api/logs").await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["source"], "database");
    assert_eq!(json["data"].as_array().unwrap().len(), 50);
    assert_eq!(json["data"][0]["id"], 1);
    assert_eq!(json["data"][0]["metadata"]["port"], 22);

    assert!(ctx.cached("logs:50").await.is_some());
}

#[tokio::test]
async fn test_logs_cached_per_limit() {
    let ctx = TestContext::connected();

    let ten = ctx
        .server
        .get("/api/logs")
        .add_query_param("limit", 10)
        .await
        .json::<Value>();
    assert_eq!(ten["source"], "database");
    assert_eq!(ten["data"].as_array().unwrap().len(), 10);

    let twenty = ctx
        .server
        .get("/api/logs")
        .add_query_param("limit", 20)
        .await
        .json::<Value>();
    assert_eq!(twenty["source"], "database");

    let ten_again = ctx
        .server
        .get("/api/logs")
        .add_query_param("limit", 10)
        .await
        .json::<Value>();
    assert_eq!(ten_again["source"], "cache");
    assert_eq!(ten_again["data"], ten["data"]);

    assert_eq!(*ctx.logs.requested_limits.lock().unwrap(), vec![10, 20]);
}

#[tokio::test]
async fn test_logs_limit_is_clamped() {
    let ctx = TestContext::connected();

    let json = ctx
        .server
        .get("/api/logs")
        .add_query_param("limit", 5000)
        .await
        .json::<Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 120);
    assert!(ctx.cached("logs:1000").await.is_some());

    ctx.server
        .get("/api/logs")
        .add_query_param("limit", 0)
        .await
        .assert_status_ok();
    assert!(ctx.cached("logs:1").await.is_some());

    assert_eq!(*ctx.logs.requested_limits.lock().unwrap(), vec![1000, 1]);
}
