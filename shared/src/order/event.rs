//! Order events - facts broadcast to observers after a committed mutation
//!
//! Events are notifications, not a source of truth: nothing is persisted or
//! replayed, and late joiners re-fetch current state through the query API.

use super::types::{ItemStatus, OrderStatus, PaymentStatus};
use crate::util::{new_id, now_millis};
use serde::{Deserialize, Serialize};

/// Order event delivered to every connected observer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Order this event belongs to
    pub order_id: String,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Acting user/staff ID
    pub actor_id: String,
    /// Acting user/staff name (snapshot resolved by the identity service)
    pub actor_name: String,
    /// Event type
    pub event_type: OrderEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    OrderCreated,
    ItemsCancelled,
    ItemUpdated,
    ItemReady,
    AllReady,
    StatusOverridden,
    Refunded,
    PaymentConfirmed,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::OrderCreated => write!(f, "order.created"),
            OrderEventType::ItemsCancelled => write!(f, "order.items_cancelled"),
            OrderEventType::ItemUpdated => write!(f, "order.item_updated"),
            OrderEventType::ItemReady => write!(f, "order.item_ready"),
            OrderEventType::AllReady => write!(f, "order.all_ready"),
            OrderEventType::StatusOverridden => write!(f, "order.status_overridden"),
            OrderEventType::Refunded => write!(f, "order.refunded"),
            OrderEventType::PaymentConfirmed => write!(f, "order.paid"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    OrderCreated {
        user_id: String,
        item_count: usize,
        total_amount: f64,
    },

    ItemsCancelled {
        /// Items actually transitioned to cancelled
        item_ids: Vec<String>,
        reason: String,
        overall_status: OrderStatus,
    },

    /// A single item changed status (staff transition or rejection)
    ItemUpdated {
        item_id: String,
        item_name: String,
        old_status: ItemStatus,
        new_status: ItemStatus,
        overall_status: OrderStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    ItemReady {
        item_id: String,
        item_name: String,
        /// Items still neither ready nor rejected
        remaining_items: usize,
    },

    /// Every item is ready or rejected: order ready for pickup
    AllReady {},

    StatusOverridden {
        old_status: OrderStatus,
        new_status: OrderStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        rejection_message: Option<String>,
    },

    Refunded {
        amount: f64,
        new_total: f64,
        overall_status: OrderStatus,
    },

    PaymentConfirmed {
        payment_status: PaymentStatus,
        amount: f64,
    },
}

impl OrderEvent {
    /// Create a new event stamped with the server time
    pub fn new(
        order_id: impl Into<String>,
        actor_id: impl Into<String>,
        actor_name: impl Into<String>,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: new_id(),
            order_id: order_id.into(),
            timestamp: now_millis(),
            actor_id: actor_id.into(),
            actor_name: actor_name.into(),
            event_type,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(OrderEventType::OrderCreated.to_string(), "order.created");
        assert_eq!(OrderEventType::AllReady.to_string(), "order.all_ready");
        assert_eq!(OrderEventType::PaymentConfirmed.to_string(), "order.paid");
    }

    #[test]
    fn test_payload_wire_tag() {
        let event = OrderEvent::new(
            "order-1",
            "staff-1",
            "Ben",
            OrderEventType::ItemReady,
            EventPayload::ItemReady {
                item_id: "item-1".to_string(),
                item_name: "Masala Dosa".to_string(),
                remaining_items: 1,
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ITEM_READY\""));
        assert!(json.contains("\"actor_name\":\"Ben\""));
    }
}
