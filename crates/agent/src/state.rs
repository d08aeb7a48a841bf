use std::sync::Arc;

use tokio::sync::watch;

use crate::config::AgentConfig;
use crate::pipeline::{Pipeline, StatusUpdate};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; nothing in here is mutated by handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AgentConfig>,
    pub pipeline: Arc<Pipeline>,
    /// Latest periodic update, `None` until the first tick completes.
    pub presence: watch::Receiver<Option<StatusUpdate>>,
}
