//! Customer Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::order::{
    Address, Order, OrderCommand, OrderCommandPayload, OrderItemInput, PaymentStatus,
};

/// Request body for placing an order
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemInput>,
    pub total_amount: f64,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Request body for cancelling items
#[derive(Debug, Deserialize)]
pub struct CancelItemsRequest {
    pub item_ids: Vec<String>,
    pub reason: String,
}

/// Request body for the payment collaborator callback
#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub payment_status: PaymentStatus,
}

/// POST /api/orders - place a new order
pub async fn place(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::PlaceOrder {
            items: payload.items,
            total_amount: payload.total_amount,
            address: payload.address,
        },
    ))?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - the calling customer's orders, newest first
pub async fn my_orders(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.engine.orders_for_user(&actor.id)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - order detail
///
/// Visible to the owner and to staff; other customers get 403.
pub async fn get_by_id(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.engine.get_order(&id)?;
    if order.user_id != actor.id && !actor.is_staff() {
        return Err(crate::utils::AppError::Forbidden(
            "access denied".to_string(),
        ));
    }
    Ok(Json(order))
}

/// POST /api/orders/{id}/cancel-items - cancel a subset of items
pub async fn cancel_items(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<CancelItemsRequest>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::CancelItems {
            order_id: id,
            item_ids: payload.item_ids,
            reason: payload.reason,
        },
    ))?;
    Ok(Json(order))
}

/// POST /api/orders/{id}/payment - payment collaborator callback
pub async fn confirm_payment(
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmPaymentRequest>,
) -> AppResult<Json<Order>> {
    let order = state.engine.execute(OrderCommand::new(
        actor,
        OrderCommandPayload::ConfirmPayment {
            order_id: id,
            payment_status: payload.payment_status,
        },
    ))?;
    Ok(Json(order))
}
