//! Command processing traits and context
//!
//! Every lifecycle operation is an action implementing [`CommandHandler`].
//! Actions load the aggregate through the [`CommandContext`] (which pins
//! them to the engine's write transaction), mutate it, and return the
//! updated aggregate plus the events to broadcast. Persistence and
//! publishing stay in the engine so an action can never commit a partial
//! mutation.

use super::engine::EngineError;
use super::storage::OrderStore;
use redb::WriteTransaction;
use shared::actor::Actor;
use shared::order::{Order, OrderEvent};

/// Metadata extracted from the triggering command
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// Command ID (for tracing)
    pub command_id: String,
    /// Acting identity
    pub actor: Actor,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
}

/// Result of a successfully executed action
#[derive(Debug)]
pub struct ActionOutcome {
    /// The mutated aggregate to persist
    pub order: Order,
    /// Events to broadcast after commit, in publish order
    pub events: Vec<OrderEvent>,
}

impl ActionOutcome {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: OrderEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Execution context handed to actions
///
/// Wraps the engine's write transaction so every load observes the current
/// committed state: the concurrency guard depends on this.
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    store: &'a OrderStore,
}

impl<'a> CommandContext<'a> {
    pub fn new(txn: &'a WriteTransaction, store: &'a OrderStore) -> Self {
        Self { txn, store }
    }

    /// Load an order within the transaction
    pub fn load_order(&self, order_id: &str) -> Result<Order, EngineError> {
        self.store
            .get_order_txn(self.txn, order_id)?
            .ok_or_else(|| EngineError::NotFound(format!("Order {order_id}")))
    }
}

/// Command handler - one implementation per lifecycle operation
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError>;
}
