//! Overall-status derivation
//!
//! Pure function from item statuses to the aggregate order status. The
//! engine recomputes this synchronously inside every mutating transaction,
//! so a committed order is never stale (admin overrides excepted).

use shared::order::{ItemStatus, OrderItem, OrderStatus};

/// Derive the overall order status from its items
///
/// 1. Every item cancelled → `cancelled`.
/// 2. Otherwise, no active item left → `rejected`.
/// 3. Otherwise, the status of the least-advanced active item
///    (pending < preparing < ready), first match wins on ties. An order
///    is only as done as its least-advanced active item.
pub fn derive_overall_status(items: &[OrderItem]) -> OrderStatus {
    if items.iter().all(|i| i.status == ItemStatus::Cancelled) {
        return OrderStatus::Cancelled;
    }

    let least_advanced = items
        .iter()
        .filter(|i| !i.is_terminal())
        .min_by_key(|i| i.status.priority());

    match least_advanced.map(|i| i.status) {
        None => OrderStatus::Rejected,
        Some(ItemStatus::Pending) => OrderStatus::Pending,
        Some(ItemStatus::Preparing) => OrderStatus::Preparing,
        Some(ItemStatus::Ready) => OrderStatus::Ready,
        // Terminal statuses are filtered out above
        Some(ItemStatus::Rejected | ItemStatus::Cancelled) => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderItemInput;

    fn items(statuses: &[ItemStatus]) -> Vec<OrderItem> {
        statuses
            .iter()
            .enumerate()
            .map(|(idx, status)| {
                let mut item = OrderItem::from_input(OrderItemInput {
                    product_id: format!("prod-{idx}"),
                    product_name: format!("Item {idx}"),
                    price: 10.0,
                    quantity: 1,
                });
                item.status = *status;
                item
            })
            .collect()
    }

    #[test]
    fn test_all_cancelled_is_cancelled() {
        let derived = derive_overall_status(&items(&[ItemStatus::Cancelled, ItemStatus::Cancelled]));
        assert_eq!(derived, OrderStatus::Cancelled);
    }

    #[test]
    fn test_rejected_and_cancelled_is_rejected() {
        let derived = derive_overall_status(&items(&[ItemStatus::Rejected, ItemStatus::Cancelled]));
        assert_eq!(derived, OrderStatus::Rejected);
    }

    #[test]
    fn test_all_rejected_is_rejected() {
        let derived = derive_overall_status(&items(&[ItemStatus::Rejected, ItemStatus::Rejected]));
        assert_eq!(derived, OrderStatus::Rejected);
    }

    #[test]
    fn test_least_advanced_active_item_wins() {
        let derived = derive_overall_status(&items(&[
            ItemStatus::Ready,
            ItemStatus::Pending,
            ItemStatus::Preparing,
        ]));
        assert_eq!(derived, OrderStatus::Pending);
    }

    #[test]
    fn test_terminal_items_do_not_hold_back_progress() {
        let derived = derive_overall_status(&items(&[
            ItemStatus::Cancelled,
            ItemStatus::Preparing,
            ItemStatus::Rejected,
        ]));
        assert_eq!(derived, OrderStatus::Preparing);

        let derived = derive_overall_status(&items(&[ItemStatus::Ready, ItemStatus::Rejected]));
        assert_eq!(derived, OrderStatus::Ready);
    }

    #[test]
    fn test_single_item_orders() {
        assert_eq!(
            derive_overall_status(&items(&[ItemStatus::Pending])),
            OrderStatus::Pending
        );
        assert_eq!(
            derive_overall_status(&items(&[ItemStatus::Preparing])),
            OrderStatus::Preparing
        );
        assert_eq!(
            derive_overall_status(&items(&[ItemStatus::Ready])),
            OrderStatus::Ready
        );
        assert_eq!(
            derive_overall_status(&items(&[ItemStatus::Rejected])),
            OrderStatus::Rejected
        );
        assert_eq!(
            derive_overall_status(&items(&[ItemStatus::Cancelled])),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_determinism_over_permutations() {
        // Same multiset in a different order: the min-priority rule keys on
        // status alone, so the result must not change.
        let a = derive_overall_status(&items(&[
            ItemStatus::Preparing,
            ItemStatus::Ready,
            ItemStatus::Cancelled,
        ]));
        let b = derive_overall_status(&items(&[
            ItemStatus::Cancelled,
            ItemStatus::Preparing,
            ItemStatus::Ready,
        ]));
        assert_eq!(a, b);
        assert_eq!(a, OrderStatus::Preparing);
    }

    #[test]
    fn test_totality_over_all_pairs() {
        // Every two-item status combination derives to exactly one of the
        // six order statuses without panicking.
        let all = [
            ItemStatus::Pending,
            ItemStatus::Preparing,
            ItemStatus::Ready,
            ItemStatus::Rejected,
            ItemStatus::Cancelled,
        ];
        for a in all {
            for b in all {
                let _ = derive_overall_status(&items(&[a, b]));
            }
        }
    }
}
