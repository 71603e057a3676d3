//! PlaceOrder command handler
//!
//! Creates a new order for the acting customer. Item name/price come in as
//! catalog snapshots and are never re-read after placement.

use crate::orders::engine::EngineError;
use crate::orders::traits::{ActionOutcome, CommandContext, CommandHandler, CommandMetadata};
use shared::order::{Address, EventPayload, Order, OrderEvent, OrderEventType, OrderItemInput};

/// PlaceOrder action
#[derive(Debug, Clone)]
pub struct PlaceOrderAction {
    pub items: Vec<OrderItemInput>,
    pub total_amount: f64,
    pub address: Option<Address>,
}

impl CommandHandler for PlaceOrderAction {
    fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        meta: &CommandMetadata,
    ) -> Result<ActionOutcome, EngineError> {
        // 1. Validate items
        if self.items.is_empty() {
            return Err(EngineError::InvalidInput(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &self.items {
            if item.quantity < 1 {
                return Err(EngineError::InvalidInput(format!(
                    "quantity must be at least 1 for {}",
                    item.product_name
                )));
            }
            if item.price < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "price must not be negative for {}",
                    item.product_name
                )));
            }
            if item.product_name.trim().is_empty() {
                return Err(EngineError::InvalidInput(
                    "product name must not be empty".to_string(),
                ));
            }
        }
        if self.total_amount < 0.0 {
            return Err(EngineError::InvalidInput(
                "total amount must not be negative".to_string(),
            ));
        }

        // 2. Create the aggregate; the caller is the owner
        let order = Order::new(
            meta.actor.id.clone(),
            self.items.clone(),
            self.total_amount,
            self.address.clone(),
        );

        // 3. Create event
        let event = OrderEvent::new(
            order.order_id.clone(),
            meta.actor.id.clone(),
            meta.actor.name.clone(),
            OrderEventType::OrderCreated,
            EventPayload::OrderCreated {
                user_id: order.user_id.clone(),
                item_count: order.items.len(),
                total_amount: order.total_amount,
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
    use shared::order::{ItemStatus, OrderStatus, PaymentStatus};

    fn create_test_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            actor: Actor::new("user-1", "Test Customer", Role::Customer),
            timestamp: 1234567890,
        }
    }

    fn item_input(name: &str, price: f64, quantity: u32) -> OrderItemInput {
        OrderItemInput {
            product_id: format!("prod-{name}"),
            product_name: name.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_place_order_success() {
        let store = OrderStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &store);

        let action = PlaceOrderAction {
            items: vec![item_input("Masala Dosa", 45.0, 2), item_input("Chai", 40.0, 2)],
            total_amount: 170.0,
            address: None,
        };

        let outcome = action.execute(&mut ctx, &create_test_metadata()).unwrap();

        let order = &outcome.order;
        assert_eq!(order.user_id, "user-1");
        assert_eq!(order.overall_status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.total_amount, 170.0);
        assert!(order.items.iter().all(|i| i.status == ItemStatus::Pending));

        assert_eq!(outcome.events.len(), 1);
        let event = &outcome.events[0];
        assert_eq!(event.event_type, OrderEventType::OrderCreated);
        assert_eq!(event.order_id, order.order_id);
        if let EventPayload::OrderCreated {
            user_id,
            item_count,
            total_amount,
        } = &event.payload
        {
            assert_eq!(user_id, "user-1");
            assert_eq!(*item_count, 2);
            assert_eq!(*total_amount, 170.0);
        } else {
            panic!("Expected OrderCreated payload");
        }
    }

    #[test]
    fn test_place_order_empty_items() {
        let store = OrderStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &store);

        let action = PlaceOrderAction {
            items: vec![],
            total_amount: 0.0,
            address: None,
        };

        let result = action.execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_place_order_zero_quantity() {
        let store = OrderStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &store);

        let action = PlaceOrderAction {
            items: vec![item_input("Chai", 40.0, 0)],
            total_amount: 0.0,
            address: None,
        };

        let result = action.execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_place_order_negative_price() {
        let store = OrderStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &store);

        let action = PlaceOrderAction {
            items: vec![item_input("Chai", -1.0, 1)],
            total_amount: 40.0,
            address: None,
        };

        let result = action.execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }
}
