//! Customer Order API Module
//!
//! Placement, partial cancellation, the customer's own listing and the
//! payment collaborator callback. Ownership checks happen inside the
//! engine; this layer only requires an authenticated actor.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth;
use crate::core::ServerState;

/// Customer order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Place a new order
        .route("/", post(handler::place).get(handler::my_orders))
        // Order detail (owner, kitchen staff or admin)
        .route("/{id}", get(handler::get_by_id))
        // Cancel a subset of items (owner only, checked in the engine)
        .route("/{id}/cancel-items", post(handler::cancel_items))
        // Payment collaborator callback
        .route("/{id}/payment", post(handler::confirm_payment))
        .layer(middleware::from_fn(auth::require_actor))
}
