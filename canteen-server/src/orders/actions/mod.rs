//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles one
//! lifecycle operation.

use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{OrderCommand, OrderCommandPayload};

mod cancel_items;
mod complete_item;
mod confirm_payment;
mod place_order;
mod process_refund;
mod reject_item;
mod set_order_status;
mod transition_item;

pub use cancel_items::CancelItemsAction;
pub use complete_item::CompleteItemAction;
pub use confirm_payment::ConfirmPaymentAction;
pub use place_order::PlaceOrderAction;
pub use process_refund::ProcessRefundAction;
pub use reject_item::RejectItemAction;
pub use set_order_status::SetOrderStatusAction;
pub use transition_item::TransitionItemAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    PlaceOrder(PlaceOrderAction),
    CancelItems(CancelItemsAction),
    TransitionItem(TransitionItemAction),
    RejectItem(RejectItemAction),
    CompleteItem(CompleteItemAction),
    SetOrderStatus(SetOrderStatusAction),
    ProcessRefund(ProcessRefundAction),
    ConfirmPayment(ConfirmPaymentAction),
}

impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        match self {
            CommandAction::PlaceOrder(action) => action.execute(ctx, meta),
            CommandAction::CancelItems(action) => action.execute(ctx, meta),
            CommandAction::TransitionItem(action) => action.execute(ctx, meta),
            CommandAction::RejectItem(action) => action.execute(ctx, meta),
            CommandAction::CompleteItem(action) => action.execute(ctx, meta),
            CommandAction::SetOrderStatus(action) => action.execute(ctx, meta),
            CommandAction::ProcessRefund(action) => action.execute(ctx, meta),
            CommandAction::ConfirmPayment(action) => action.execute(ctx, meta),
        }
    }
}

/// Convert OrderCommand to CommandAction
///
/// This is the ONLY place with a match on OrderCommandPayload.
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        match &cmd.payload {
            OrderCommandPayload::PlaceOrder {
                items,
                total_amount,
                address,
            } => CommandAction::PlaceOrder(PlaceOrderAction {
                items: items.clone(),
                total_amount: *total_amount,
                address: address.clone(),
            }),
            OrderCommandPayload::CancelItems {
                order_id,
                item_ids,
                reason,
            } => CommandAction::CancelItems(CancelItemsAction {
                order_id: order_id.clone(),
                item_ids: item_ids.clone(),
                reason: reason.clone(),
            }),
            OrderCommandPayload::TransitionItem {
                order_id,
                item_id,
                new_status,
            } => CommandAction::TransitionItem(TransitionItemAction {
                order_id: order_id.clone(),
                item_id: item_id.clone(),
                new_status: *new_status,
            }),
            OrderCommandPayload::RejectItem {
                order_id,
                item_id,
                reason,
            } => CommandAction::RejectItem(RejectItemAction {
                order_id: order_id.clone(),
                item_id: item_id.clone(),
                reason: reason.clone(),
            }),
            OrderCommandPayload::CompleteItem { order_id, item_id } => {
                CommandAction::CompleteItem(CompleteItemAction {
                    order_id: order_id.clone(),
                    item_id: item_id.clone(),
                })
            }
            OrderCommandPayload::SetOrderStatus {
                order_id,
                new_status,
                rejection_message,
                active_count,
            } => CommandAction::SetOrderStatus(SetOrderStatusAction {
                order_id: order_id.clone(),
                new_status: *new_status,
                rejection_message: rejection_message.clone(),
                active_count: *active_count,
            }),
            OrderCommandPayload::ProcessRefund { order_id, amount } => {
                CommandAction::ProcessRefund(ProcessRefundAction {
                    order_id: order_id.clone(),
                    amount: *amount,
                })
            }
            OrderCommandPayload::ConfirmPayment {
                order_id,
                payment_status,
            } => CommandAction::ConfirmPayment(ConfirmPaymentAction {
                order_id: order_id.clone(),
                payment_status: *payment_status,
            }),
        }
    }
}
