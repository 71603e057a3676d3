//! Kitchen API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::orders::KitchenStats;
use crate::utils::AppResult;
use shared::order::{ItemStatus, Order, OrderCommand, OrderCommandPayload, OrderStatus};

/// Query params for listing kitchen orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by overall status (optional)
    pub status: Option<OrderStatus>,
}

/// Request body for an item transition
#[derive(Debug, Deserialize)]
pub struct TransitionItemRequest {
    pub status: ItemStatus,
}

/// Request body for an item rejection
#[derive(Debug, Deserialize)]
pub struct RejectItemRequest {
    pub reason: String,
}

/// GET /api/kitchen/orders - active orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.engine.kitchen_orders(query.status)?;
    Ok(Json(orders))
}

/// GET /api/kitchen/orders/stats - active order counts per status
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<KitchenStats>> {
    let stats = state.engine.kitchen_stats()?;
    Ok(Json(stats))
}

/// PATCH /api/kitchen/orders/{id}/items/{item_id}/status - advance an item
pub async fn transition_item(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<TransitionItemRequest>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::TransitionItem {
            order_id: id,
            item_id,
            new_status: payload.status,
        },
    ))?;
    Ok(Json(order))
}

/// POST /api/kitchen/orders/{id}/items/{item_id}/reject - reject an item
pub async fn reject_item(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<RejectItemRequest>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::RejectItem {
            order_id: id,
            item_id,
            reason: payload.reason,
        },
    ))?;
    Ok(Json(order))
}

/// POST /api/kitchen/orders/{id}/items/{item_id}/complete - mark ready
pub async fn complete_item(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::CompleteItem {
            order_id: id,
            item_id,
        },
    ))?;
    Ok(Json(order))
}
