//! HTTP API
//!
//! Route groups:
//! - `/api/orders` - customer surface (place, cancel items, own listing,
//!   payment confirmation)
//! - `/api/kitchen` - kitchen staff surface (active orders, stats, item
//!   transitions)
//! - `/api/admin` - admin surface (full listing, status override, refunds)
//! - `/api/events` - observer WebSocket stream
//! - `/health` - liveness (public)

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod admin;
pub mod events;
pub mod health;
pub mod kitchen;
pub mod orders;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Customer API - authenticated actor required
        .merge(orders::router())
        // Kitchen API - staff role required
        .merge(kitchen::router())
        // Admin API - admin role required
        .merge(admin::router())
        // Observer stream - authenticated actor required
        .merge(events::router())
        // Health API - public route
        .merge(health::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - generate a unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state.clone())
}
