//! Publication of host status changes.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::model::HostStatusChange;

/// A status change addressed to a notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub channel: String,
    #[serde(flatten)]
    pub change: HostStatusChange,
}

/// Receiver of status changes. Publishing is fire-and-forget.
pub trait EventSink: Send + Sync {
    fn publish(&self, channel: &str, change: HostStatusChange);
}

/// In-process sink fanning events out to every subscriber
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<StatusEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventSink for BroadcastSink {
    fn publish(&self, channel: &str, change: HostStatusChange) {
        debug!(channel, status = %change, "Broadcasting host status");
        let event = StatusEvent { channel: channel.to_string(), change };
        // Ignore errors if there are no receivers
        let _ = self.tx.send(event);
    }
}
