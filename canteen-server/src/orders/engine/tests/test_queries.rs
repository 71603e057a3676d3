//! Read paths: customer listing, kitchen display, admin dashboard

use super::*;
use shared::order::PaymentStatus;

#[test]
fn test_orders_for_user_newest_first() {
    let engine = OrderEngine::in_memory();
    let first = place_order(&engine, &customer(), vec![item_input("Chai", 40.0, 1)], 40.0);
    let second = place_order(&engine, &customer(), vec![item_input("Idli", 30.0, 1)], 30.0);
    let other = Actor::new("user-2", "Noor", shared::actor::Role::Customer);
    place_order(&engine, &other, vec![item_input("Vada", 35.0, 1)], 35.0);

    let orders = engine.orders_for_user("user-1").unwrap();
    assert_eq!(orders.len(), 2);
    let ids: Vec<_> = orders.iter().map(|o| o.order_id.as_str()).collect();
    assert!(ids.contains(&first.order_id.as_str()));
    assert!(ids.contains(&second.order_id.as_str()));
    assert!(orders[0].created_at >= orders[1].created_at);
}

#[test]
fn test_kitchen_orders_exclude_closed() {
    let engine = OrderEngine::in_memory();
    let open = place_dosa_chai(&engine);
    let closed = place_dosa_chai(&engine);
    engine
        .execute(OrderCommand::new(
            admin(),
            OrderCommandPayload::SetOrderStatus {
                order_id: closed.order_id.clone(),
                new_status: OrderStatus::Completed,
                rejection_message: None,
                active_count: 2,
            },
        ))
        .unwrap();

    let kitchen = engine.kitchen_orders(None).unwrap();
    assert_eq!(kitchen.len(), 1);
    assert_eq!(kitchen[0].order_id, open.order_id);
}

#[test]
fn test_kitchen_orders_status_filter() {
    let engine = OrderEngine::in_memory();
    let pending = place_dosa_chai(&engine);
    let preparing = place_dosa_chai(&engine);
    for item in &preparing.items {
        engine
            .execute(OrderCommand::new(
                staff(),
                OrderCommandPayload::TransitionItem {
                    order_id: preparing.order_id.clone(),
                    item_id: item.item_id.clone(),
                    new_status: ItemStatus::Preparing,
                },
            ))
            .unwrap();
    }

    let only_pending = engine.kitchen_orders(Some(OrderStatus::Pending)).unwrap();
    assert_eq!(only_pending.len(), 1);
    assert_eq!(only_pending[0].order_id, pending.order_id);

    let only_preparing = engine.kitchen_orders(Some(OrderStatus::Preparing)).unwrap();
    assert_eq!(only_preparing.len(), 1);
    assert_eq!(only_preparing[0].order_id, preparing.order_id);
}

#[test]
fn test_kitchen_stats_counts_by_status() {
    let engine = OrderEngine::in_memory();
    place_dosa_chai(&engine);
    place_dosa_chai(&engine);
    let advancing = place_dosa_chai(&engine);
    for item in &advancing.items {
        engine
            .execute(OrderCommand::new(
                staff(),
                OrderCommandPayload::CompleteItem {
                    order_id: advancing.order_id.clone(),
                    item_id: item.item_id.clone(),
                },
            ))
            .unwrap();
    }

    let stats = engine.kitchen_stats().unwrap();
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.preparing, 0);
    assert_eq!(stats.ready, 1);
}

#[test]
fn test_list_orders_filters_and_paginates() {
    let engine = OrderEngine::in_memory();
    for _ in 0..3 {
        place_dosa_chai(&engine);
    }
    let paid = place_dosa_chai(&engine);
    engine
        .execute(OrderCommand::new(
            customer(),
            OrderCommandPayload::ConfirmPayment {
                order_id: paid.order_id.clone(),
                payment_status: PaymentStatus::Paid,
            },
        ))
        .unwrap();

    let all = engine.list_orders(&OrderListFilter::default()).unwrap();
    assert_eq!(all.total, 4);
    assert_eq!(all.orders.len(), 4);

    let paid_only = engine
        .list_orders(&OrderListFilter {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(paid_only.total, 1);
    assert_eq!(paid_only.orders[0].order_id, paid.order_id);

    let page = engine
        .list_orders(&OrderListFilter {
            limit: 2,
            offset: 2,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.orders.len(), 2);
}

#[test]
fn test_get_missing_order_not_found() {
    let engine = OrderEngine::in_memory();
    assert!(matches!(
        engine.get_order("nonexistent"),
        Err(EngineError::NotFound(_))
    ));
}
