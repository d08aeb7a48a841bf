//! On-demand status report and latest periodic indicator.

use axum::extract::State;
use axum::{routing::get, Json, Router};

use hostwatch_core::report::StatusReport;

use crate::auth::Authorized;
use crate::error::AppResult;
use crate::pipeline::StatusUpdate;
use crate::state::AppState;

/// GET /api/v1/status -- run one round now and return the full report.
async fn get_status(_auth: Authorized, State(state): State<AppState>) -> AppResult<Json<StatusReport>> {
    let report = state.pipeline.report().await;
    tracing::info!(
        level = %report.level,
        sources_available = report.sources_available,
        "On-demand status report",
    );
    Ok(Json(report))
}

/// GET /api/v1/presence -- most recent periodic update, `null` before the
/// first tick.
async fn get_presence(State(state): State<AppState>) -> Json<Option<StatusUpdate>> {
    Json(state.presence.borrow().clone())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/presence", get(get_presence))
}
