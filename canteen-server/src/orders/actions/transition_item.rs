//! TransitionItem command handler
//!
//! Kitchen staff advances a single item to `preparing` or `ready`.
//! Rejection and cancellation have dedicated reason-carrying operations, so
//! they are not reachable through here, and items never move backwards.

use crate::orders::derive::derive_overall_status;
use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{EventPayload, ItemStatus, OrderEvent, OrderEventType};

/// TransitionItem action
#[derive(Debug, Clone)]
pub struct TransitionItemAction {
    pub order_id: String,
    pub item_id: String,
    pub new_status: ItemStatus,
}

impl CommandHandler for TransitionItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Staff only
        if !meta.actor.is_staff() {
            return Err(EngineError::Forbidden(
                "only kitchen staff can transition items".to_string(),
            ));
        }

        // 2. Target must be a forward working status
        let Some(new_priority) = self.new_status.priority() else {
            return Err(EngineError::InvalidInput(
                "items can only be advanced to PREPARING or READY".to_string(),
            ));
        };
        if self.new_status == ItemStatus::Pending {
            return Err(EngineError::InvalidInput(
                "items cannot be moved back to PENDING".to_string(),
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

        // 4. Terminal items accept no further mutation. Soft failure: the
        //    caller refreshes and retries
        if order.items[idx].is_terminal() {
            return Err(EngineError::ItemTerminal(format!(
                "item {} was cancelled or rejected, refresh to see the updated order",
                self.item_id
            )));
        }

        let old_status = order.items[idx].status;
        let current_priority = old_status.priority().unwrap_or(0);
        if new_priority <= current_priority {
            return Err(EngineError::InvalidState(format!(
                "item {} is already {:?}",
                self.item_id, old_status
            )));
        }

        // 5. Apply the transition and recompute the overall status
        let item = &mut order.items[idx];
        item.status = self.new_status;
        item.status_updated_by = Some(meta.actor.id.clone());
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
                new_status: self.new_status,
                overall_status: order.overall_status,
                reason: None,
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
        action: &TransitionItemAction,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        let txn = store.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, store);
        action.execute(&mut ctx, meta)
    }

    #[test]
    fn test_advance_to_preparing() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 2);

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            new_status: ItemStatus::Preparing,
        };
        let outcome = run(&store, &action, &staff_metadata()).unwrap();

        assert_eq!(outcome.order.items[0].status, ItemStatus::Preparing);
        assert_eq!(
            outcome.order.items[0].status_updated_by.as_deref(),
            Some("staff-1")
        );
        // The other item is still pending, so the order stays pending
        assert_eq!(outcome.order.overall_status, OrderStatus::Pending);

        if let EventPayload::ItemUpdated {
            old_status,
            new_status,
            ..
        } = &outcome.events[0].payload
        {
            assert_eq!(*old_status, ItemStatus::Pending);
            assert_eq!(*new_status, ItemStatus::Preparing);
        } else {
            panic!("Expected ItemUpdated payload");
        }
    }

    #[test]
    fn test_overall_status_follows_least_advanced() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 1);

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            new_status: ItemStatus::Preparing,
        };
        let outcome = run(&store, &action, &staff_metadata()).unwrap();
        assert_eq!(outcome.order.overall_status, OrderStatus::Preparing);
    }

    #[test]
    fn test_terminal_item_soft_failure() {
        let store = OrderStore::open_in_memory().unwrap();
        let mut order = seeded_order(&store, 1);
        order.items[0].status = ItemStatus::Cancelled;
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order).unwrap();
        txn.commit().unwrap();

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            new_status: ItemStatus::Preparing,
        };
        let result = run(&store, &action, &staff_metadata());
        assert!(matches!(result, Err(EngineError::ItemTerminal(_))));

        // No silent mutation
        let stored = store.get_order(&order.order_id).unwrap().unwrap();
        assert_eq!(stored.items[0].status, ItemStatus::Cancelled);
    }

    #[test]
    fn test_backward_transition_rejected() {
        let store = OrderStore::open_in_memory().unwrap();
        let mut order = seeded_order(&store, 1);
        order.items[0].status = ItemStatus::Ready;
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order).unwrap();
        txn.commit().unwrap();

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            new_status: ItemStatus::Preparing,
        };
        let result = run(&store, &action, &staff_metadata());
        assert!(matches!(result, Err(EngineError::InvalidState(_))));
    }

    #[test]
    fn test_terminal_target_rejected() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 1);

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            new_status: ItemStatus::Rejected,
        };
        let result = run(&store, &action, &staff_metadata());
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_customer_forbidden() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 1);

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: order.items[0].item_id.clone(),
            new_status: ItemStatus::Preparing,
        };
        let meta = CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor::new("user-1", "Customer", Role::Customer),
            timestamp: 0,
        };
        let result = run(&store, &action, &meta);
        assert!(matches!(result, Err(EngineError::Forbidden(_))));
    }

    #[test]
    fn test_missing_item() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = seeded_order(&store, 1);

        let action = TransitionItemAction {
            order_id: order.order_id.clone(),
            item_id: "nonexistent".to_string(),
            new_status: ItemStatus::Preparing,
        };
        let result = run(&store, &action, &staff_metadata());
        assert!(matches!(result, Err(EngineError::NotFound(_))));
    }
}
