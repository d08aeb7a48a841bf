#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hostwatch_agent::config::AgentConfig;
use hostwatch_agent::fetcher::GlancesClient;
use hostwatch_agent::pipeline::Pipeline;
use hostwatch_agent::routes;
use hostwatch_agent::sink::WatchSink;
use hostwatch_agent::state::AppState;
use hostwatch_core::health::Thresholds;

pub const TEST_TOKEN: &str = "test-token";

/// Base URL of the mocked metrics API, mirroring the real `/api/4` prefix.
pub fn base_url(server: &MockServer) -> String {
    format!("{}/api/4", server.uri())
}

/// Mount a JSON response for one endpoint path (e.g. `"cpu/total"`).
pub async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/4/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a non-200 response for one endpoint path.
pub async fn mount_status(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/api/4/{endpoint}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn pipeline_for(server: &MockServer, thresholds: Thresholds) -> Pipeline {
    let client = GlancesClient::with_timeout(base_url(server), Duration::from_secs(2))
        .expect("client builds");
    Pipeline::new(client, thresholds)
}

pub fn test_config(server: &MockServer) -> AgentConfig {
    AgentConfig {
        glances_url: base_url(server),
        api_token: TEST_TOKEN.to_string(),
        interval: Duration::from_secs(30),
        host: "127.0.0.1".to_string(),
        port: 0,
        thresholds: Thresholds::default(),
    }
}

/// Build the full application router against a mocked metrics API.
///
/// Returns the sink as well so tests can publish presence updates.
pub fn build_test_app(server: &MockServer) -> (Router, WatchSink) {
    let config = test_config(server);
    let pipeline = pipeline_for(server, config.thresholds);
    let (sink, presence) = WatchSink::channel();

    let state = AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
        presence,
    };
    (routes::build_app(state), sink)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_token(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
