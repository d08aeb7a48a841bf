//! Periodic status loop.
//!
//! Runs one round per tick on a fixed interval and publishes the coarse
//! indicator to a [`StatusSink`]. A failed or partial round only degrades
//! that tick. Cancelling the token stops the loop; a round that is still in
//! flight is dropped without publishing anything.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::pipeline::{Pipeline, StatusUpdate};
use crate::sink::StatusSink;

/// Run the periodic loop until `cancel` is triggered.
///
/// The first round runs immediately.
pub async fn run(
    pipeline: Arc<Pipeline>,
    sink: Arc<dyn StatusSink>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Status loop started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Status loop stopping");
                break;
            }
            _ = ticker.tick() => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::info!("Status loop stopping, discarding in-flight round");
                        break;
                    }
                    _ = run_tick(&pipeline, sink.as_ref()) => {}
                }
            }
        }
    }
}

/// Run one round and publish its indicator. Errors are logged, never returned.
pub async fn run_tick(pipeline: &Pipeline, sink: &dyn StatusSink) -> StatusUpdate {
    let outcome = pipeline.run_round().await;
    let update = pipeline.status_update(&outcome);

    tracing::debug!(
        indicator = update.indicator.as_str(),
        level = %outcome.classification.level,
        text = %update.text,
        "Status tick",
    );

    if let Err(e) = sink.publish(update.clone()).await {
        tracing::error!(error = %e, "Failed to publish status update");
    }

    update
}
