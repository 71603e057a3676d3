//! CompleteItem command handler
//!
//! Kitchen staff marks an item's preparation finished (status `ready`).
//! When this leaves every item ready-or-rejected the order is force-set to
//! `ready` and an all-ready notification fires once. The force agrees with
//! derivation whenever it applies (all active items are ready), which the
//! engine tests pin down.

use crate::orders::derive::derive_overall_status;
use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, ItemStatus, OrderEvent, OrderEventType, OrderStatus};

/// CompleteItem action
#[derive(Debug, Clone)]
pub struct CompleteItemAction {
    pub order_id: String,
    pub item_id: String,
}

impl CommandHandler for CompleteItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Staff only
        if !meta.actor.is_staff() {
            return Err(EngineError::Forbidden(
                "only kitchen staff can complete items".to_string(),
            ));
        }

        // 2. Load the aggregate and find the item
        let mut order = ctx.load_order(&self.order_id)?;
        let idx = order
            .items
            .iter()
            .position(|i| i.item_id == self.item_id)
            .ok_or_else(|| {
                EngineError::NotFound(format!("Item {} in order {}", self.item_id, self.order_id))
            })?;

        // 3. Terminal items stay terminal
        if order.items[idx].is_terminal() {
            return Err(EngineError::ItemTerminal(format!(
                "item {} was cancelled or rejected, refresh to see the updated order",
                self.item_id
            )));
        }

        let was_all_ready = order.all_ready_or_rejected();

        // 4. Mark ready (idempotent for an already-ready item)
        let item = &mut order.items[idx];
        item.status = ItemStatus::Ready;
        item.status_updated_by = Some(meta.actor.id.clone());
        let item_name = item.product_name.clone();

        // 5. Recompute, then force `ready` for the all-ready case
        order.overall_status = derive_overall_status(&order.items);
        let all_ready = order.all_ready_or_rejected();
        if all_ready {
            order.overall_status = OrderStatus::Ready;
        }
        order.touch();

        // 6. Items still being worked on
        let remaining = order
            .items
            .iter()
            .filter(|i| !matches!(i.status, ItemStatus::Ready | ItemStatus::Rejected))
            .count();

        // 7. Create events; all-ready fires only when newly met
        let mut outcome = ActionOutcome::new(order).with_event(OrderEvent::new(
            self.order_id.clone(),
            meta.actor.id.clone(),
            meta.actor.name.clone(),
            OrderEventType::ItemReady,
            EventPayload::ItemReady {
                item_id: self.item_id.clone(),
                item_name,
                remaining_items: remaining,
            },
        ));
        if all_ready && !was_all_ready {
            outcome = outcome.with_event(OrderEvent::new(
                self.order_id.clone(),
                meta.actor.id.clone(),
                meta.actor.name.clone(),
                OrderEventType::AllReady,
                EventPayload::AllReady {},
            ));
        }

        Ok(outcome)
    }
}
