//! Order Lifecycle Module
//!
//! Implements order fulfillment for the canteen:
//!
//! - **engine**: Core OrderEngine for command processing and queries
//! - **actions**: One handler per lifecycle operation
//! - **derive**: Pure derivation of the overall status from item statuses
//! - **guard**: Optimistic concurrency guard for admin overrides
//! - **storage**: redb-based persistence of order aggregates
//! - **money**: Decimal-backed refund arithmetic
//!
//! # Architecture
//!
//! ```text
//! Command → OrderEngine → Action → mutate aggregate → derive status
//!                │                                         │
//!                └── store (redb, one txn) ◄───────────────┘
//!                │
//!             Broadcast
//!                │
//!          All Observers
//! ```
//!
//! # Data Flow
//!
//! 1. An authenticated actor submits an OrderCommand
//! 2. OrderEngine opens a write transaction and dispatches to the action
//! 3. The action loads the aggregate fresh, validates role/ownership and
//!    state, mutates items, recomputes the overall status
//! 4. The aggregate is persisted and the transaction commits
//! 5. Events are broadcast to all connected observers

pub mod actions;
pub mod derive;
pub mod engine;
pub mod guard;
pub mod money;
pub mod storage;
pub mod traits;

// Re-exports
pub use derive::derive_overall_status;
pub use engine::{EngineError, EngineResult, KitchenStats, OrderEngine, OrderListFilter, OrderPage};
pub use storage::{OrderStore, StoreError};

// Re-export shared types for convenience
pub use shared::order::{
    CommandError, CommandErrorCode, EventPayload, Order, OrderCommand, OrderCommandPayload,
    OrderEvent, OrderEventType, OrderItem, OrderStatus,
};
