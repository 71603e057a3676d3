//! OrderEngine - lifecycle orchestration
//!
//! This module handles:
//! - Command dispatch to the per-operation actions
//! - Atomic persistence: load → mutate → derive → persist in one write
//!   transaction; a failed action leaves no partial effect
//! - Event broadcasting after a successful commit
//! - Read paths for customers, the kitchen display and the admin dashboard
//!
//! # Command Flow
//!
//! ```text
//! execute(cmd)
//!     ├─ 1. Convert command to action
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Action loads the aggregate (fresh), validates, mutates,
//!     │     recomputes the overall status
//!     ├─ 4. Persist the aggregate and its indices
//!     ├─ 5. Commit transaction
//!     ├─ 6. Broadcast event(s) in publish order
//!     └─ 7. Return the updated aggregate
//! ```

mod error;
pub use error::*;

use super::actions::CommandAction;
use super::storage::{OrderStore, StoreError};
use super::traits::{CommandContext, CommandHandler, CommandMetadata};
use crate::broadcast::EventBroadcaster;
use shared::order::{Order, OrderCommand, OrderEvent, OrderStatus, PaymentStatus};
use tokio::sync::broadcast;

/// Per-status counts of active orders for the kitchen display
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct KitchenStats {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
}

/// Filter for the admin order listing
#[derive(Debug, Clone)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for OrderListFilter {
    fn default() -> Self {
        Self {
            status: None,
            payment_status: None,
            limit: 20,
            offset: 0,
        }
    }
}

/// One page of the admin order listing
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    /// Total matching orders before pagination
    pub total: usize,
}

/// Order lifecycle engine
///
/// The only writer of the order store. Cheap to clone; all clones share
/// the same store and broadcast channel.
#[derive(Debug, Clone)]
pub struct OrderEngine {
    store: OrderStore,
    broadcaster: EventBroadcaster,
}

impl OrderEngine {
    pub fn new(store: OrderStore, broadcaster: EventBroadcaster) -> Self {
        Self { store, broadcaster }
    }

    /// Create an engine over an in-memory store (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            store: OrderStore::open_in_memory().expect("in-memory store"),
            broadcaster: EventBroadcaster::new(),
        }
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.broadcaster.subscribe()
    }

    /// Get the broadcaster
    pub fn broadcaster(&self) -> &EventBroadcaster {
        &self.broadcaster
    }

    /// Get the underlying store
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Execute a command and return the updated aggregate
    ///
    /// Events are broadcast only after the transaction committed, so
    /// observers never see a mutation that did not land.
    pub fn execute(&self, cmd: OrderCommand) -> EngineResult<Order> {
        let (order, events) = self.process(&cmd)?;
        for event in events {
            self.broadcaster.publish(event);
        }
        Ok(order)
    }

    /// Process a command within a single write transaction
    fn process(&self, cmd: &OrderCommand) -> EngineResult<(Order, Vec<OrderEvent>)> {
        tracing::debug!(
            command_id = %cmd.command_id,
            actor_id = %cmd.actor.id,
            role = %cmd.actor.role,
            "Processing command"
        );

        let meta = CommandMetadata {
            command_id: cmd.command_id.clone(),
            actor: cmd.actor.clone(),
            timestamp: cmd.timestamp,
        };

        // 1. Convert to action
        let action: CommandAction = cmd.into();

        // 2. Begin write transaction; dropping it on any error path aborts
        //    with no partial effect
        let txn = self.store.begin_write()?;
        let mut ctx = CommandContext::new(&txn, &self.store);

        // 3. Execute
        let outcome = action.execute(&mut ctx, &meta)?;

        // 4. Persist the aggregate and its indices
        self.store.store_order(&txn, &outcome.order)?;

        // 5. Commit
        txn.commit().map_err(StoreError::from)?;

        tracing::info!(
            command_id = %cmd.command_id,
            order_id = %outcome.order.order_id,
            overall_status = ?outcome.order.overall_status,
            event_count = outcome.events.len(),
            "Command processed"
        );

        Ok((outcome.order, outcome.events))
    }

    // ========== Public Query Methods ==========

    /// Get an order by ID
    pub fn get_order(&self, order_id: &str) -> EngineResult<Order> {
        self.store
            .get_order(order_id)?
            .ok_or_else(|| EngineError::NotFound(format!("Order {order_id}")))
    }

    /// Get a customer's orders, newest first
    pub fn orders_for_user(&self, user_id: &str) -> EngineResult<Vec<Order>> {
        Ok(self.store.get_orders_for_user(user_id)?)
    }

    /// Get active orders for the kitchen display, optionally filtered to
    /// one overall status, newest first
    pub fn kitchen_orders(&self, status: Option<OrderStatus>) -> EngineResult<Vec<Order>> {
        let mut orders = self.store.get_active_orders()?;
        if let Some(status) = status {
            orders.retain(|o| o.overall_status == status);
        }
        Ok(orders)
    }

    /// Per-status counts of active orders
    pub fn kitchen_stats(&self) -> EngineResult<KitchenStats> {
        let mut stats = KitchenStats::default();
        for order in self.store.get_active_orders()? {
            match order.overall_status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Ready => stats.ready += 1,
                // Closed orders never sit in the active index
                _ => {}
            }
        }
        Ok(stats)
    }

    /// Admin listing over all orders with filters and pagination
    pub fn list_orders(&self, filter: &OrderListFilter) -> EngineResult<OrderPage> {
        let mut orders = self.store.get_all_orders()?;
        if let Some(status) = filter.status {
            orders.retain(|o| o.overall_status == status);
        }
        if let Some(payment_status) = filter.payment_status {
            orders.retain(|o| o.payment_status == payment_status);
        }
        let total = orders.len();
        let orders = orders
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();
        Ok(OrderPage { orders, total })
    }
}

#[cfg(test)]
mod tests;
