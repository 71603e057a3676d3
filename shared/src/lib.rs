//! Shared types for the canteen order server
//!
//! Common types used by the server and its clients: the order data model,
//! lifecycle events, commands, actor identity and error codes.

pub mod actor;
pub mod order;
pub mod util;

// Re-exports
pub use actor::{Actor, Role};
pub use order::{
    CommandError, CommandErrorCode, EventPayload, Order, OrderCommand, OrderCommandPayload,
    OrderEvent, OrderEventType, OrderItem, OrderStatus,
};
pub use serde::{Deserialize, Serialize};
