//! Admin API Module
//!
//! Admin-only surface: full order listing with filters, whole-order status
//! overrides (guarded against concurrent item changes) and refunds.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth;
use crate::core::ServerState;

/// Admin router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // All orders with filters and pagination
        .route("/orders", get(handler::list))
        // Whole-order status override (concurrency-guarded)
        .route("/orders/{id}/status", patch(handler::set_status))
        // Refund a paid order
        .route("/orders/{id}/refund", post(handler::refund))
        // Innermost first: identity is resolved before the role check runs
        .layer(middleware::from_fn(auth::require_admin))
        .layer(middleware::from_fn(auth::require_actor))
}
