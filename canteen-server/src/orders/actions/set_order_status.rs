//! SetOrderStatus command handler
//!
//! Admin whole-order override. This is the one path allowed to set the
//! overall status out of sync with item derivation, and the one path
//! protected by the optimistic concurrency guard: kitchen and customer
//! actions mutate items while the admin reviews a cached view, so the
//! caller's active-item count is validated against the freshly loaded
//! aggregate before anything mutates.

use crate::orders::engine::EngineError;
use crate::orders::guard;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// SetOrderStatus action
#[derive(Debug, Clone)]
pub struct SetOrderStatusAction {
    pub order_id: String,
    pub new_status: OrderStatus,
    pub rejection_message: Option<String>,
    /// Active item count as seen by the caller when their view was fetched
    pub active_count: usize,
}

impl CommandHandler for SetOrderStatusAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Admin only
        if !meta.actor.is_admin() {
            return Err(EngineError::Forbidden(
                "only admins can override order status".to_string(),
            ));
        }

        // 2. Load the current aggregate and run the guard before any
        //    mutation
        let mut order = ctx.load_order(&self.order_id)?;
        guard::check_active_count(&order, self.active_count)?;

        let old_status = order.overall_status;

        // 3. Apply the override
        if self.new_status == OrderStatus::Rejected {
            let message = self
                .rejection_message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .ok_or_else(|| {
                    EngineError::InvalidInput("rejection message is required".to_string())
                })?;
            order.rejection_message = Some(message.to_string());
        } else {
            order.rejection_message = None;
        }
        order.overall_status = self.new_status;
        order.touch();

        // 4. Create event
        let event = OrderEvent::new(
            order.order_id.clone(),
            meta.actor.id.clone(),
            meta.actor.name.clone(),
            OrderEventType::StatusOverridden,
            EventPayload::StatusOverridden {
                old_status,
                new_status: self.new_status,
                rejection_message: order.rejection_message.clone(),
            },
        );

        Ok(ActionOutcome::new(order).with_event(event))
    }
}
