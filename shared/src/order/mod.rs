//! Order lifecycle types
//!
//! This module provides the types for the order fulfillment system:
//! - Aggregate: the Order root with its embedded items
//! - Commands: requests from actors to mutate an order
//! - Events: facts broadcast to observers after a committed mutation
//! - Types: item/order/payment statuses, inputs, error codes

pub mod aggregate;
pub mod command;
pub mod event;
pub mod types;

// Re-exports
pub use aggregate::{Address, Order, OrderItem};
pub use command::{OrderCommand, OrderCommandPayload};
pub use event::{EventPayload, OrderEvent, OrderEventType};
pub use types::*;
