//! Kitchen API Module
//!
//! Staff-facing surface: active order listing, per-status stats and item
//! transitions. All routes require the kitchen staff (or admin) role.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth;
use crate::core::ServerState;

/// Kitchen router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Active kitchen orders, optional ?status= filter
        .route("/orders", get(handler::list))
        // Active order counts per status
        .route("/orders/stats", get(handler::stats))
        // Advance a single item
        .route(
            "/orders/{id}/items/{item_id}/status",
            patch(handler::transition_item),
        )
        // Reject a single item with a reason
        .route(
            "/orders/{id}/items/{item_id}/reject",
            post(handler::reject_item),
        )
        // Mark a single item ready
        .route(
            "/orders/{id}/items/{item_id}/complete",
            post(handler::complete_item),
        )
        // Innermost first: identity is resolved before the role check runs
        .layer(middleware::from_fn(auth::require_staff))
        .layer(middleware::from_fn(auth::require_actor))
}
