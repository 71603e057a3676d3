//! Order aggregate - the root document mutated by the lifecycle engine
//!
//! An order owns its items outright: the item set is fixed at placement
//! (only statuses and status-adjacent fields mutate afterwards), and the
//! whole aggregate is loaded and stored as one unit of atomicity.

use super::types::{ItemStatus, OrderItemInput, OrderStatus, PaymentStatus};
use crate::util::{new_id, now_millis};
use serde::{Deserialize, Serialize};

/// Delivery address, opaque to the lifecycle engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Order line item (embedded in the order aggregate)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Item ID, unique within the order, fixed at placement
    pub item_id: String,
    /// Product reference, immutable after placement
    pub product_id: String,
    /// Product name snapshot
    pub product_name: String,
    /// Unit price snapshot
    pub price: f64,
    /// Quantity (>= 1)
    pub quantity: u32,
    /// Item status
    pub status: ItemStatus,
    /// Staff member who last transitioned the status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_updated_by: Option<String>,
    /// Rejection or cancellation reason (required for terminal statuses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_message: Option<String>,
    /// Observed preparation time in minutes (analytics only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<f64>,
}

impl OrderItem {
    /// Build a pending item from a placement input
    pub fn from_input(input: OrderItemInput) -> Self {
        Self {
            item_id: new_id(),
            product_id: input.product_id,
            product_name: input.product_name,
            price: input.price,
            quantity: input.quantity,
            status: ItemStatus::Pending,
            status_updated_by: None,
            rejection_message: None,
            preparation_time: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Order aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID (assigned by the server)
    pub order_id: String,
    /// Owner, immutable
    pub user_id: String,
    /// Items in placement order; the set never changes after creation
    pub items: Vec<OrderItem>,
    /// Overall status (derived, except for admin overrides)
    pub overall_status: OrderStatus,
    /// Set only when an admin rejects the whole order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_message: Option<String>,
    /// Payment status, owned by the payment collaborator
    pub payment_status: PaymentStatus,
    /// Monetary total; only ever decremented by refunds, floored at 0
    pub total_amount: f64,
    /// Delivery address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Creation timestamp (Unix milliseconds), immutable
    pub created_at: i64,
    /// Last mutation timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Order {
    /// Create a new order with all items pending
    pub fn new(
        user_id: impl Into<String>,
        items: Vec<OrderItemInput>,
        total_amount: f64,
        address: Option<Address>,
    ) -> Self {
        let now = now_millis();
        Self {
            order_id: new_id(),
            user_id: user_id.into(),
            items: items.into_iter().map(OrderItem::from_input).collect(),
            overall_status: OrderStatus::Pending,
            rejection_message: None,
            payment_status: PaymentStatus::Pending,
            total_amount,
            address,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.item_id == item_id)
    }

    /// Items that are neither cancelled nor rejected
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|i| !i.is_terminal())
    }

    /// Count of active items: the optimistic-concurrency token for
    /// admin overrides
    pub fn active_item_count(&self) -> usize {
        self.active_items().count()
    }

    /// Every item is ready or rejected (the pickup-ready condition)
    pub fn all_ready_or_rejected(&self) -> bool {
        self.items
            .iter()
            .all(|i| matches!(i.status, ItemStatus::Ready | ItemStatus::Rejected))
    }

    /// Every item is rejected or cancelled
    pub fn all_terminal(&self) -> bool {
        self.items.iter().all(|i| i.is_terminal())
    }

    pub fn is_closed(&self) -> bool {
        self.overall_status.is_closed()
    }

    /// Refresh the mutation timestamp
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}
