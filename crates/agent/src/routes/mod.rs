pub mod health;
pub mod status;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// A round is bounded by the 5 s per-endpoint timeout; leave headroom.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(status::router())
}

/// Build the full application router with its middleware stack.
///
/// Shared by `main.rs` and the integration tests so both exercise the same
/// layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        // Health check at root level (not under /api/v1).
        .merge(health::router())
        .nest("/api/v1", api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Bind the HTTP listener. `host` may be an IP literal or a hostname.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}
