//! ConfirmPayment command handler
//!
//! The payment collaborator reports the outcome of a payment attempt. The
//! engine records the flag and notifies observers only when the order
//! actually became paid.

use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, OrderEvent, OrderEventType, PaymentStatus};

/// ConfirmPayment action
#[derive(Debug, Clone)]
pub struct ConfirmPaymentAction {
    pub order_id: String,
    pub payment_status: PaymentStatus,
}

impl CommandHandler for ConfirmPaymentAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Load and update the flag
        let mut order = ctx.load_order(&self.order_id)?;
        order.payment_status = self.payment_status;
        order.touch();

        // 2. Notify only on transition to paid
        let mut outcome = ActionOutcome::new(order);
        if self.payment_status == PaymentStatus::Paid {
            let event = OrderEvent::new(
                self.order_id.clone(),
                meta.actor.id.clone(),
                meta.actor.name.clone(),
                OrderEventType::PaymentConfirmed,
                EventPayload::PaymentConfirmed {
                    payment_status: self.payment_status,
                    amount: outcome.order.total_amount,
                },
            );
            outcome = outcome.with_event(event);
        }

        Ok(outcome)
    }
}
