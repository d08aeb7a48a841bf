//! Integration tests for the HTTP surface.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use wiremock::MockServer;

use common::{body_json, build_test_app, get, get_with_token, mount_json, TEST_TOKEN};
use hostwatch_agent::pipeline::StatusUpdate;
use hostwatch_agent::sink::StatusSink;
use hostwatch_core::health::Indicator;

// ---------------------------------------------------------------------------
// Test: GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_version() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn listener_binds_to_a_hostname() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let listener = hostwatch_agent::routes::bind("localhost", 0)
        .await
        .expect("localhost should resolve and bind");
    let addr = listener.local_addr().expect("bound address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("request succeeds");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/status authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_without_token_is_unauthorized() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let response = get(app, "/api/v1/status").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn status_with_wrong_token_is_unauthorized() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let response = get_with_token(app, "/api/v1/status", "nope").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/status report contents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_returns_report_for_current_round() {
    let server = MockServer::start().await;
    mount_json(&server, "cpu/total", json!({ "total": 95.0 })).await;
    mount_json(
        &server,
        "mem",
        json!({ "percent": 92.0, "used": 2_147_483_648_u64, "total": 4_294_967_296_u64 }),
    )
    .await;
    mount_json(&server, "load", json!({ "min1": 4.0, "min5": 3.0, "min15": 2.0 })).await;
    mount_json(
        &server,
        "alert",
        json!([
            { "state": "CAREFUL", "type": "MEM" },
            { "state": "OK", "type": "LOAD" },
            { "state": "CRITICAL", "type": "CPU", "mean": 96.5 }
        ]),
    )
    .await;
    let (app, _sink) = build_test_app(&server);

    let response = get_with_token(app, "/api/v1/status", TEST_TOKEN).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Server Status");
    assert_eq!(json["level"], "WARNING");
    assert_eq!(json["color"], "red");
    assert_eq!(json["color_rgb"], 0xff0000);
    assert_eq!(
        json["status_line"],
        "WARNING (Monitoring-system critical alert, CPU high load, Memory shortage)"
    );
    assert_eq!(json["cpu"]["usage_percent"]["value"], 95.0);
    assert_eq!(json["cpu"]["usage_percent"]["status"], "critical");
    assert_eq!(json["cpu"]["temp_celsius"]["status"], "unknown");
    assert!(json["gpu"]["usage_percent"]["value"].is_null());
    assert_eq!(json["memory"]["used_gib"], 2.0);
    assert_eq!(json["memory"]["total_gib"], 4.0);
    assert_eq!(json["load"]["min1"], 4.0);
    assert_eq!(json["sources_available"], 4);

    let alerts = json["alerts"].as_array().expect("alerts block present");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["text"], "[CAREFUL] MEM");
    assert_eq!(alerts[0]["severity"], "caution");
    assert_eq!(alerts[1]["text"], "[CRITICAL] CPU (value: 96.5)");
}

#[tokio::test]
async fn status_with_unreachable_metrics_is_good_but_flagged() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let response = get_with_token(app, "/api/v1/status", TEST_TOKEN).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["level"], "GOOD");
    assert_eq!(json["status_line"], "GOOD");
    assert_eq!(json["sources_available"], 0);
    assert!(json.get("alerts").is_none());
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/presence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn presence_is_null_before_first_tick() {
    let server = MockServer::start().await;
    let (app, _sink) = build_test_app(&server);

    let response = get(app, "/api/v1/presence").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_null());
}

#[tokio::test]
async fn presence_returns_latest_update() {
    let server = MockServer::start().await;
    let (app, sink) = build_test_app(&server);

    sink.publish(StatusUpdate {
        indicator: Indicator::Attention,
        text: "CPU: 80% | Mem: 40%".to_string(),
        at: Utc::now(),
    })
    .await
    .expect("publish");

    let response = get(app, "/api/v1/presence").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["indicator"], "attention");
    assert_eq!(json["text"], "CPU: 80% | Mem: 40%");
}
