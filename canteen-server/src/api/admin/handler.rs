//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::orders::OrderListFilter;
use crate::utils::AppResult;
use shared::order::{Order, OrderCommand, OrderCommandPayload, OrderStatus, PaymentStatus};

/// Query params for the admin order listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

/// Response for the admin order listing
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Request body for a status override
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub rejection_message: Option<String>,
    /// Active item count as seen by the admin's view
    pub active_count: usize,
}

/// Request body for a refund
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub amount: f64,
}

/// GET /api/admin/orders - all orders with filters, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrderListResponse>> {
    let filter = OrderListFilter {
        status: query.status,
        payment_status: query.payment_status,
        limit: query.limit,
        offset: query.offset,
    };
    let page = state.engine.list_orders(&filter)?;
    Ok(Json(OrderListResponse {
        orders: page.orders,
        total: page.total,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// PATCH /api/admin/orders/{id}/status - whole-order override
///
/// Fails with 409 CONFLICT when items changed since the admin's view was
/// fetched; the client reloads and resubmits with the fresh count.
pub async fn set_status(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::SetOrderStatus {
            order_id: id,
            new_status: payload.status,
            rejection_message: payload.rejection_message,
            active_count: payload.active_count,
        },
    ))?;
    Ok(Json(order))
}

/// POST /api/admin/orders/{id}/refund - refund a paid order
pub async fn refund(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<RefundRequest>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::ProcessRefund {
            order_id: id,
            amount: payload.amount,
        },
    ))?;
    Ok(Json(order))
}
