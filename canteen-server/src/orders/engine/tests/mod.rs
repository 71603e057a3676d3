use super::*;
use shared::actor::{Actor, Role};
use shared::order::{ItemStatus, OrderCommandPayload, OrderItemInput};

mod test_queries;

fn customer() -> Actor {
    Actor::new("user-1", "Asha", Role::Customer)
}

fn staff() -> Actor {
    Actor::new("staff-1", "Ben", Role::KitchenStaff)
}

fn admin() -> Actor {
    Actor::new("admin-1", "Cora", Role::Admin)
}

fn item_input(name: &str, price: f64, quantity: u32) -> OrderItemInput {
    OrderItemInput {
        product_id: format!("prod-{name}"),
        product_name: name.to_string(),
        price,
        quantity,
    }
}

/// Helper: place an order as the given customer and return it
fn place_order(engine: &OrderEngine, actor: &Actor, items: Vec<OrderItemInput>, total: f64) -> Order {
    engine
        .execute(OrderCommand::new(
            actor.clone(),
            OrderCommandPayload::PlaceOrder {
                items,
                total_amount: total,
                address: None,
            },
        ))
        .expect("place order")
}

/// Helper: the standard two-item canteen order
fn place_dosa_chai(engine: &OrderEngine) -> Order {
    place_order(
        engine,
        &customer(),
        vec![item_input("Masala Dosa", 45.0, 2), item_input("Masala Chai", 40.0, 2)],
        170.0,
    )
}
