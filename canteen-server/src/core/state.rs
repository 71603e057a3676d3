//! Server state - shared handles for every request
//!
//! `ServerState` holds the engine (which owns the store and the event
//! broadcaster). Cloning is cheap: all clones share the same underlying
//! services.

use std::sync::Arc;

use crate::broadcast::{BroadcastConfig, EventBroadcaster};
use crate::core::{Config, Result};
use crate::orders::{OrderEngine, OrderStore};

/// Shared server state
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Arc<Config>,
    /// Order lifecycle engine
    pub engine: OrderEngine,
}

impl ServerState {
    /// Initialize all services from the configuration
    ///
    /// Creates the working directory and opens (or creates) the order
    /// store underneath it.
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let store_path = config.store_path();
        tracing::info!(path = %store_path.display(), "Opening order store");
        let store = OrderStore::open(&store_path)?;

        let broadcaster = EventBroadcaster::from_config(BroadcastConfig {
            channel_capacity: config.event_channel_capacity,
        });

        let engine = OrderEngine::new(store, broadcaster.clone());

        Ok(Self {
            config: Arc::new(config.clone()),
            engine,
        })
    }

    /// The event broadcaster shared with the engine
    pub fn broadcaster(&self) -> &EventBroadcaster {
        self.engine.broadcaster()
    }
}
