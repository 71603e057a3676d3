//! Observer Stream Module
//!
//! WebSocket fan-out of order lifecycle events to connected observers.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth;
use crate::core::ServerState;

/// Observer stream router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/events", get(handler::stream))
        .layer(middleware::from_fn(auth::require_actor))
}
