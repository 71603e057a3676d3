//! RejectItem command handler
//!
//! Kitchen staff rejects a single item with a mandatory reason. The
//! rejection reason lands on the item; the order-level rejection message is
//! reserved for whole-order admin rejections.

use crate::orders::derive::derive_overall_status;
use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, ItemStatus, OrderEvent, OrderEventType};

/// RejectItem action
#[derive(Debug, Clone)]
pub struct RejectItemAction {
    pub order_id: String,
    pub item_id: String,
    pub reason: String,
}

impl CommandHandler for RejectItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Staff only
        if !meta.actor.is_staff() {
            return Err(EngineError::Forbidden(
                "only kitchen staff can reject items".to_string(),
            ));
        }

        // 2. A rejection always carries a reason
        if self.reason.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "rejection reason is required".to_string(),
            ));
        }

        // 3. Load the aggregate and find the item
        let mut order = ctx.load_order(&self.order_id)?;
        let idx = order
            .items
            .iter()
            .position(|i| i.item_id == self.item_id)
            .ok_or_else(|| {
                EngineError::NotFound(format!("Item {} in order {}", self.item_id, self.order_id))
            })?;

        // 4. Terminal items stay terminal: covers both the item already
        //    cancelled by the customer and a duplicate rejection
        if order.items[idx].is_terminal() {
            return Err(EngineError::ItemTerminal(format!(
                "item {} was already cancelled or rejected, refresh to see the updated order",
                self.item_id
            )));
        }

        // 5. Reject and recompute the overall status
        let old_status = order.items[idx].status;
        let item = &mut order.items[idx];
        item.status = ItemStatus::Rejected;
        item.status_updated_by = Some(meta.actor.id.clone());
        item.rejection_message = Some(self.reason.clone());
        let item_name = item.product_name.clone();
        order.overall_status = derive_overall_status(&order.items);
        order.touch();

        // 6. Create event
        let event = OrderEvent::new(
            order.order_id.clone(),
            meta.actor.id.clone(),
            meta.actor.name.clone(),
            OrderEventType::ItemUpdated,
            EventPayload::ItemUpdated {
                item_id: self.item_id.clone(),
                item_name,
                old_status,
                new_status: ItemStatus::Rejected,
                overall_status: order.overall_status,
                reason: Some(self.reason.clone()),
            },
        );

        Ok(ActionOutcome::new(order).with_event(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::storage::OrderStore;
    use shared::actor::{Actor, Role};
    use shared::order::{Order, OrderItemInput, OrderStatus};

    fn staff_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor::new("staff-1", "Test Staff", Role::KitchenStaff),
            timestamp: 1234567890,
        }
    }

    fn seeded_order(store: &OrderStore, item_count: usize) -> Order {
        let items = (0..item_count)
            .map(|idx| OrderItemInput {
                product_id: format!("prod-{idx}"),
                product_name: format!("Item {idx}"),
                price: 10.0,
                quantity: 1,
            })
            .collect();
        let order = Order::new("user-1", items, 10.0 * item_count as f64, None);
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order).unwrap();
        txn.commit().unwrap();
        order
    }

    fn run(
        store: &OrderStore,
        action: &RejectItemAction,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        let txn = store.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, store);
        action.execute(&mut ctx, meta)
    }

    #[test]
    fn test_reject_item() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 2);

        let action = RejectItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            reason: "out of stock".to_string(),
        };
        let outcome = run(&store, &action, &staff_metadata()).unwrap();

        let item = &outcome.order.items[0];
        assert_eq!(item.status, ItemStatus::Rejected);
        assert_eq!(item.rejection_message.as_deref(), Some("out of stock"));
        assert_eq!(item.status_updated_by.as_deref(), Some("staff-1"));
        // One pending item remains
        assert_eq!(outcome.order.overall_status, OrderStatus::Pending);
        // Order-level rejection message is untouched
        assert!(outcome.order.rejection_message.is_none());
    }

    #[test]
    fn test_reject_last_active_item_rejects_order() {
        let store = OrderStore::open_in_memory().unwrap();
        let mut order = seeded_order(&store, 2);
        order.items[1].status = ItemStatus::Cancelled;
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order).unwrap();
        txn.commit().unwrap();

        let action = RejectItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            reason: "burnt".to_string(),
        };
        let outcome = run(&store, &action, &staff_metadata()).unwrap();
        assert_eq!(outcome.order.overall_status, OrderStatus::Rejected);
    }

    #[test]
    fn test_blank_reason_rejected() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 1);

        let action = RejectItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            reason: "".to_string(),
        };
        let result = run(&store, &action, &staff_metadata());
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_cancelled_item_soft_failure() {
        let store = OrderStore::open_in_memory().unwrap();
        let mut order = seeded_order(&store, 1);
        order.items[0].status = ItemStatus::Cancelled;
        order.items[0].rejection_message = Some("customer left".to_string());
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order).unwrap();
        txn.commit().unwrap();

        let action = RejectItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            reason: "out of stock".to_string(),
        };
        let result = run(&store, &action, &staff_metadata());
        assert!(matches!(result, Err(EngineError::ItemTerminal(_))));

        // The customer's cancellation reason survives
        let stored = store.get_order(&order.order_id).unwrap().unwrap();
        assert_eq!(
            stored.items[0].rejection_message.as_deref(),
            Some("customer left")
        );
    }

    #[test]
    fn test_double_rejection_soft_failure() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 1);

        let action = RejectItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            reason: "first".to_string(),
        };
        let outcome = run(&store, &action, &staff_metadata()).unwrap();
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &outcome.order).unwrap();
        txn.commit().unwrap();

        let again = RejectItemAction {
            reason: "second".to_string(),
            ..action
        };
        let result = run(&store, &again, &staff_metadata());
        assert!(matches!(result, Err(EngineError::ItemTerminal(_))));
    }
}
