//! Destinations for the periodic status update.
//!
//! The scheduler hands every [`StatusUpdate`] to a [`StatusSink`]. The bundled
//! [`WatchSink`] keeps the latest update in a `tokio::sync::watch` channel,
//! which the `/api/v1/presence` route reads.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::pipeline::StatusUpdate;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Every receiver has been dropped.
    #[error("Status sink is closed")]
    Closed,
}

#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn publish(&self, update: StatusUpdate) -> Result<(), SinkError>;
}

/// Sink backed by a watch channel holding the most recent update.
pub struct WatchSink {
    tx: watch::Sender<Option<StatusUpdate>>,
}

impl WatchSink {
    /// Create the sink and a receiver that starts out empty (`None`).
    pub fn channel() -> (Self, watch::Receiver<Option<StatusUpdate>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl StatusSink for WatchSink {
    async fn publish(&self, update: StatusUpdate) -> Result<(), SinkError> {
        self.tx.send(Some(update)).map_err(|_| SinkError::Closed)
    }
}
