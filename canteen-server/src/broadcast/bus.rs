//! Event broadcaster core
//!
//! # Architecture
//!
//! ```text
//! OrderEngine ──▶ publish() ──▶ broadcast::Sender<OrderEvent>
//!                                      │
//!                      ┌───────────────┼───────────────┐
//!                      ▼               ▼               ▼
//!               kitchen display  admin dashboard  customer view
//! ```
//!
//! Fire-and-forget fan-out over a single `tokio::sync::broadcast` channel:
//! every currently-subscribed observer receives every event in publish
//! order. Nothing is persisted or replayed: observers that connect later
//! re-fetch current state through the query API. A slow observer lags and
//! is eventually dropped by the channel; it can never block the publisher.

use shared::order::OrderEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Configuration for the broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Capacity of the broadcast channel
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

/// Event broadcaster - fan-out of committed order mutations
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    event_tx: broadcast::Sender<OrderEvent>,
    shutdown_token: CancellationToken,
}

impl EventBroadcaster {
    /// Create a broadcaster with the default configuration
    pub fn new() -> Self {
        Self::from_config(BroadcastConfig::default())
    }

    /// Create a broadcaster from a configuration
    pub fn from_config(config: BroadcastConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.channel_capacity);
        Self {
            event_tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Create a broadcaster with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(BroadcastConfig {
            channel_capacity: capacity,
        })
    }

    /// Publish an event to all connected observers
    ///
    /// Fire-and-forget: a send with no active receivers is not an error,
    /// the event is simply dropped.
    pub fn publish(&self, event: OrderEvent) {
        let event_name = event.event_type;
        match self.event_tx.send(event) {
            Ok(receivers) => {
                tracing::debug!(event = %event_name, receivers, "Event published");
            }
            Err(_) => {
                tracing::debug!(event = %event_name, "Event dropped: no active observers");
            }
        }
    }

    /// Subscribe to the event stream
    ///
    /// The receiver sees every event published after this call, in publish
    /// order.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Number of currently connected observers
    pub fn observer_count(&self) -> usize {
        self.event_tx.receiver_count()
    }

    /// Shutdown token for observer tasks to watch
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Signal all observer tasks to stop
    pub fn shutdown(&self) {
        tracing::info!("Shutting down event broadcaster");
        self.shutdown_token.cancel();
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
