//! Shared types for the order lifecycle
//!
//! Statuses, item inputs and command error codes. All enums use
//! SCREAMING_SNAKE_CASE on the wire.

use serde::{Deserialize, Serialize};

// ============================================================================
// Statuses
// ============================================================================

/// Item status
///
/// Transition graph: pending → {preparing, ready, rejected, cancelled};
/// preparing → {ready, rejected, cancelled}; ready → {rejected, cancelled}.
/// `rejected` and `cancelled` are absorbing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Rejected,
    Cancelled,
}

impl ItemStatus {
    /// Terminal statuses accept no further mutation
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Rejected | ItemStatus::Cancelled)
    }

    /// Derivation priority of an active status (lower = less advanced)
    ///
    /// Terminal statuses return `None`; they never participate in
    /// derivation.
    pub fn priority(self) -> Option<u8> {
        match self {
            ItemStatus::Pending => Some(1),
            ItemStatus::Preparing => Some(2),
            ItemStatus::Ready => Some(3),
            ItemStatus::Rejected | ItemStatus::Cancelled => None,
        }
    }
}

/// Overall order status
///
/// Recomputed from item statuses after every committed mutation, except
/// for the admin override path and `completed`, which is only ever set by
/// an admin or the payment collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Cancelled,
    Rejected,
    Completed,
}

impl OrderStatus {
    /// A closed order accepts no further customer mutation
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            OrderStatus::Cancelled | OrderStatus::Rejected | OrderStatus::Completed
        )
    }
}

/// Payment status, owned by the payment collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

// ============================================================================
// Item input
// ============================================================================

/// Item input for order placement
///
/// Name and price are a point-in-time snapshot supplied by the catalog
/// collaborator; the server never re-reads live catalog data after
/// placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemInput {
    /// Product ID
    pub product_id: String,
    /// Product name snapshot
    pub product_name: String,
    /// Unit price snapshot
    pub price: f64,
    /// Quantity (>= 1)
    pub quantity: u32,
}

// ============================================================================
// Command errors
// ============================================================================

/// Command error returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    /// Missing or blank required field
    InvalidInput,
    /// Order or item ID unresolved
    NotFound,
    /// Actor lacks ownership or role
    Forbidden,
    /// Operation not valid for the current aggregate state
    InvalidState,
    /// Item already rejected/cancelled: soft failure, refresh and retry
    ItemTerminal,
    /// No targeted item was actually cancelled
    NothingToCancel,
    /// Concurrency guard mismatch: caller must reload
    Conflict,
    /// Refund attempted on an unpaid order
    PaymentPrecondition,
    /// Storage or internal failure
    InternalError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(ItemStatus::Rejected.is_terminal());
        assert!(ItemStatus::Cancelled.is_terminal());
        assert!(!ItemStatus::Pending.is_terminal());
        assert!(!ItemStatus::Preparing.is_terminal());
        assert!(!ItemStatus::Ready.is_terminal());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(ItemStatus::Pending.priority() < ItemStatus::Preparing.priority());
        assert!(ItemStatus::Preparing.priority() < ItemStatus::Ready.priority());
        assert_eq!(ItemStatus::Rejected.priority(), None);
        assert_eq!(ItemStatus::Cancelled.priority(), None);
    }

    #[test]
    fn test_closed_order_statuses() {
        assert!(OrderStatus::Cancelled.is_closed());
        assert!(OrderStatus::Rejected.is_closed());
        assert!(OrderStatus::Completed.is_closed());
        assert!(!OrderStatus::Pending.is_closed());
        assert!(!OrderStatus::Preparing.is_closed());
        assert!(!OrderStatus::Ready.is_closed());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ItemStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
        let status: OrderStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(status, OrderStatus::Completed);
    }
}
