//! Optimistic concurrency guard for admin order overrides
//!
//! Admin overrides operate on a client-cached view of the order, while
//! kitchen and customer actions keep mutating items underneath. The guard
//! compares the caller's view of the active item count against the freshly
//! loaded aggregate inside the same write transaction; a mismatch means the
//! set of active items changed since the view was fetched and the caller
//! must reload. A single count is enough here: the only admin-relevant
//! race is "did the set of active items change".

use super::engine::EngineError;
use shared::order::Order;

/// Check the caller's active-item count against the current aggregate
///
/// `order` must be loaded from the store within the current write
/// transaction, never from a cached copy.
pub fn check_active_count(order: &Order, caller_active_count: usize) -> Result<(), EngineError> {
    let current = order.active_item_count();
    if current != caller_active_count {
        return Err(EngineError::Conflict {
            caller: caller_active_count,
            current,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{ItemStatus, Order, OrderItemInput};

    fn order_with_statuses(statuses: &[ItemStatus]) -> Order {
        let inputs = statuses
            .iter()
            .enumerate()
            .map(|(idx, _)| OrderItemInput {
                product_id: format!("prod-{idx}"),
                product_name: format!("Item {idx}"),
                price: 10.0,
                quantity: 1,
            })
            .collect();
        let mut order = Order::new("user-1", inputs, 30.0, None);
        for (item, status) in order.items.iter_mut().zip(statuses) {
            item.status = *status;
        }
        order
    }

    #[test]
    fn test_matching_count_passes() {
        let order = order_with_statuses(&[
            ItemStatus::Pending,
            ItemStatus::Preparing,
            ItemStatus::Ready,
        ]);
        assert!(check_active_count(&order, 3).is_ok());
    }

    #[test]
    fn test_stale_count_conflicts() {
        let order = order_with_statuses(&[
            ItemStatus::Pending,
            ItemStatus::Pending,
            ItemStatus::Cancelled,
        ]);
        let err = check_active_count(&order, 3).unwrap_err();
        match err {
            EngineError::Conflict { caller, current } => {
                assert_eq!(caller, 3);
                assert_eq!(current, 2);
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_terminal_items_are_not_active() {
        let order = order_with_statuses(&[ItemStatus::Rejected, ItemStatus::Cancelled]);
        assert!(check_active_count(&order, 0).is_ok());
    }
}
