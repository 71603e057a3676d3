//! CancelItems command handler
//!
//! Customer-initiated partial cancellation: the order owner cancels a
//! subset of items with a reason. Items that already reached a terminal
//! status are skipped; if nothing was actually cancelled the whole
//! operation fails so the caller can refresh their view.

use crate::orders::derive::derive_overall_status;
use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, ItemStatus, OrderEvent, OrderEventType};

/// CancelItems action
#[derive(Debug, Clone)]
pub struct CancelItemsAction {
    pub order_id: String,
    pub item_ids: Vec<String>,
    pub reason: String,
}

impl CommandHandler for CancelItemsAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Validate input
        if self.item_ids.is_empty() {
            return Err(EngineError::InvalidInput(
                "select at least one item to cancel".to_string(),
            ));
        }
        if self.reason.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "cancellation reason is required".to_string(),
            ));
        }

        // 2. Load the aggregate
        let mut order = ctx.load_order(&self.order_id)?;

        // 3. Only the owner may cancel
        if order.user_id != meta.actor.id {
            return Err(EngineError::Forbidden(
                "only the order owner can cancel items".to_string(),
            ));
        }

        // 4. Closed orders accept no further mutation
        if order.is_closed() {
            return Err(EngineError::InvalidState(format!(
                "cannot cancel items on a {:?} order",
                order.overall_status
            )));
        }

        // 5. Cancel every targeted item that is still active
        let mut cancelled_ids = Vec::new();
        for item in &mut order.items {
            if self.item_ids.contains(&item.item_id) && !item.is_terminal() {
                item.status = ItemStatus::Cancelled;
                item.rejection_message = Some(self.reason.clone());
                cancelled_ids.push(item.item_id.clone());
            }
        }

        if cancelled_ids.is_empty() {
            return Err(EngineError::NothingToCancel(
                "no active items matched the requested ids".to_string(),
            ));
        }

        // 6. Recompute the overall status
        order.overall_status = derive_overall_status(&order.items);
        order.touch();

        // 7. Create event
        let event = OrderEvent::new(
            order.order_id.clone(),
            meta.actor.id.clone(),
            meta.actor.name.clone(),
            OrderEventType::ItemsCancelled,
            EventPayload::ItemsCancelled {
                item_ids: cancelled_ids,
                reason: self.reason.clone(),
                overall_status: order.overall_status,
            },
        );

        Ok(ActionOutcome::new(order).with_event(event))
    }
}
