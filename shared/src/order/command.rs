//! Order commands - requests from actors to mutate an order
//!
//! A command carries the acting identity alongside its payload; the engine
//! trusts the identity (it comes from the identity collaborator) and
//! authorizes by role and ownership only.

use super::types::{ItemStatus, OrderItemInput, OrderStatus, PaymentStatus};
use crate::actor::Actor;
use crate::order::aggregate::Address;
use crate::util::{new_id, now_millis};
use serde::{Deserialize, Serialize};

/// Order command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
    /// Command unique ID (for tracing)
    pub command_id: String,
    /// Acting identity
    pub actor: Actor,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Command payload
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    pub fn new(actor: Actor, payload: OrderCommandPayload) -> Self {
        Self {
            command_id: new_id(),
            actor,
            timestamp: now_millis(),
            payload,
        }
    }
}

/// Command payload variants, one per lifecycle operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    /// Customer places a new order; all items start pending
    PlaceOrder {
        items: Vec<OrderItemInput>,
        total_amount: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<Address>,
    },

    /// Customer cancels a subset of their own order's items
    CancelItems {
        order_id: String,
        item_ids: Vec<String>,
        reason: String,
    },

    /// Staff advances an item to `preparing` or `ready`
    TransitionItem {
        order_id: String,
        item_id: String,
        new_status: ItemStatus,
    },

    /// Staff rejects an item with a reason
    RejectItem {
        order_id: String,
        item_id: String,
        reason: String,
    },

    /// Staff marks an item's preparation finished
    CompleteItem { order_id: String, item_id: String },

    /// Admin overrides the whole-order status, guarded by the caller's
    /// view of the active item count
    SetOrderStatus {
        order_id: String,
        new_status: OrderStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        rejection_message: Option<String>,
        /// Active item count as seen by the caller when the view was fetched
        active_count: usize,
    },

    /// Payment collaborator refunds a paid order
    ProcessRefund { order_id: String, amount: f64 },

    /// Payment collaborator reports a payment status
    ConfirmPayment {
        order_id: String,
        payment_status: PaymentStatus,
    },
}

impl OrderCommandPayload {
    /// Order targeted by this command, if it targets an existing one
    pub fn order_id(&self) -> Option<&str> {
        match self {
            OrderCommandPayload::PlaceOrder { .. } => None,
            OrderCommandPayload::CancelItems { order_id, .. }
            | OrderCommandPayload::TransitionItem { order_id, .. }
            | OrderCommandPayload::RejectItem { order_id, .. }
            | OrderCommandPayload::CompleteItem { order_id, .. }
            | OrderCommandPayload::SetOrderStatus { order_id, .. }
            | OrderCommandPayload::ProcessRefund { order_id, .. }
            | OrderCommandPayload::ConfirmPayment { order_id, .. } => Some(order_id),
        }
    }
}
