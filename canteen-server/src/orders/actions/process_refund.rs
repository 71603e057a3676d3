//! ProcessRefund command handler
//!
//! Refunds a paid order: the total is decremented (floored at zero), the
//! payment status flips to refunded, and the order closes as `rejected`
//! when every item already died, `completed` otherwise.

use crate::orders::engine::EngineError;
use crate::orders::money;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentStatus};

/// ProcessRefund action
#[derive(Debug, Clone)]
pub struct ProcessRefundAction {
    pub order_id: String,
    pub amount: f64,
}

impl CommandHandler for ProcessRefundAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Admin only
        if !meta.actor.is_admin() {
            return Err(EngineError::Forbidden(
                "only admins can process refunds".to_string(),
            ));
        }

        // 2. Validate amount
        if self.amount <= 0.0 {
            return Err(EngineError::InvalidInput(
                "refund amount must be positive".to_string(),
            ));
        }

        // 3. Load and check the payment precondition
        let mut order = ctx.load_order(&self.order_id)?;
        if order.payment_status != PaymentStatus::Paid {
            return Err(EngineError::PaymentPrecondition(format!(
                "order {} was not paid",
                self.order_id
            )));
        }

        // 4. Apply the refund, floored at zero
        order.total_amount = money::apply_refund(order.total_amount, self.amount);
        order.payment_status = PaymentStatus::Refunded;
        order.overall_status = if order.all_terminal() {
            OrderStatus::Rejected
        } else {
            OrderStatus::Completed
        };
        order.touch();

        // 5. Create event
        let event = OrderEvent::new(
            order.order_id.clone(),
            meta.actor.id.clone(),
            meta.actor.name.clone(),
            OrderEventType::Refunded,
            EventPayload::Refunded {
                amount: self.amount,
                new_total: order.total_amount,
                overall_status: order.overall_status,
            },
        );

        Ok(ActionOutcome::new(order).with_event(event))
    }
}
