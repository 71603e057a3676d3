//! Event broadcasting
//!
//! Process-wide fan-out of order lifecycle events to connected observers
//! (kitchen display, admin dashboard, customer views).

mod bus;

pub use bus::{BroadcastConfig, EventBroadcaster};
