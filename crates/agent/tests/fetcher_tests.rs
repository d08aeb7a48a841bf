//! Integration tests for the metrics API client.
//!
//! A `wiremock` server stands in for the metrics API.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{base_url, mount_json, mount_status};
use hostwatch_agent::fetcher::GlancesClient;
use hostwatch_core::endpoint::Endpoint;

// ---------------------------------------------------------------------------
// Test: single endpoint fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_parsed_json_on_200() {
    let server = MockServer::start().await;
    mount_json(&server, "cpu/total", json!({ "total": 12.5 })).await;

    let client = GlancesClient::new(base_url(&server)).expect("client builds");
    let value = client.fetch(Endpoint::CpuTotal).await;

    assert_eq!(value, Some(json!({ "total": 12.5 })));
}

#[tokio::test]
async fn non_200_status_is_absent() {
    let server = MockServer::start().await;
    mount_status(&server, "mem", 500).await;
    mount_status(&server, "load", 204).await;

    let client = GlancesClient::new(base_url(&server)).expect("client builds");
    assert_eq!(client.fetch(Endpoint::Mem).await, None);
    assert_eq!(client.fetch(Endpoint::Load).await, None);
}

#[tokio::test]
async fn undecodable_body_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = GlancesClient::new(base_url(&server)).expect("client builds");
    assert_eq!(client.fetch(Endpoint::Sensors).await, None);
}

#[tokio::test]
async fn slow_endpoint_times_out_to_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4/gpu"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GlancesClient::with_timeout(base_url(&server), Duration::from_millis(200))
        .expect("client builds");
    assert_eq!(client.fetch(Endpoint::Gpu).await, None);
}

#[tokio::test]
async fn unreachable_host_is_absent() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let client = GlancesClient::with_timeout("http://127.0.0.1:9/api/4", Duration::from_millis(500))
        .expect("client builds");
    assert_eq!(client.fetch(Endpoint::Alert).await, None);
}

// ---------------------------------------------------------------------------
// Test: fan-out over every endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_isolates_failures_per_endpoint() {
    let server = MockServer::start().await;
    mount_json(&server, "cpu/total", json!({ "total": 33.0 })).await;
    mount_json(&server, "load", json!({ "min1": 0.5, "min5": 0.4, "min15": 0.3 })).await;
    mount_status(&server, "mem", 503).await;
    Mock::given(method("GET"))
        .and(path("/api/4/sensors"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    // gpu and alert are not mounted: wiremock answers 404.

    let client = GlancesClient::with_timeout(base_url(&server), Duration::from_millis(300))
        .expect("client builds");
    let raw = client.fetch_all().await;

    assert_eq!(raw.cpu, Some(json!({ "total": 33.0 })));
    assert!(raw.load.is_some());
    assert!(raw.mem.is_none());
    assert!(raw.sensors.is_none());
    assert!(raw.gpu.is_none());
    assert!(raw.alert.is_none());
    assert_eq!(raw.available(), 2);
}

#[tokio::test]
async fn fetch_all_runs_requests_concurrently() {
    let server = MockServer::start().await;
    for endpoint in Endpoint::ALL {
        Mock::given(method("GET"))
            .and(path(format!("/api/4/{}", endpoint.path())))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;
    }

    let client = GlancesClient::new(base_url(&server)).expect("client builds");
    let started = std::time::Instant::now();
    let raw = client.fetch_all().await;
    let elapsed = started.elapsed();

    assert_eq!(raw.available(), Endpoint::ALL.len());
    // Six sequential requests would take at least 2.4 s.
    assert!(
        elapsed < Duration::from_millis(2000),
        "fetch_all took {elapsed:?}, expected concurrent requests"
    );
}
