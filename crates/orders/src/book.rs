//! In-memory record of placed orders.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use checkout::{Order, OrderId};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{OrderError, Result};
use crate::status::OrderStatus;

/// A placed order and its fulfilment progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
    pub order: Order,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl TrackedOrder {
    fn new(order: Order) -> Self {
        Self {
            updated_at: order.placed_at,
            order,
            status: OrderStatus::Confirmed,
            tracking_number: None,
            cancelled_at: None,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order.order_id
    }

    /// Checks whether the shopper may still cancel at `now`.
    ///
    /// The order must not have shipped and must be no older than `window`.
    pub fn check_cancellable(&self, now: DateTime<Utc>, window: Duration) -> Result<()> {
        let reason = if !self.status.can_cancel() {
            Some("order has already shipped or been closed")
        } else if now - self.order.placed_at > window {
            Some("cancellation window has passed")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(OrderError::CannotCancel {
                order_id: self.order_id().clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Returns true if the shopper may still cancel at `now`.
    pub fn can_cancel(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.check_cancellable(now, window).is_ok()
    }
}

/// Shared handle to every order placed this session.
///
/// Lookups are case-insensitive; ids are stored upper case.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Arc<RwLock<HashMap<OrderId, TrackedOrder>>>,
}

impl OrderBook {
    /// Creates an empty order book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly placed order as confirmed.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub fn record(&self, order: Order) -> TrackedOrder {
        let tracked = TrackedOrder::new(order);
        self.write()
            .insert(tracked.order_id().clone(), tracked.clone());

        tracing::info!(total = %tracked.order.total, "order recorded");
        tracked
    }

    /// Looks up an order by id, ignoring case and surrounding whitespace.
    pub fn get(&self, order_id: &str) -> Option<TrackedOrder> {
        self.read().get(&OrderId::parse(order_id)).cloned()
    }

    /// Moves an order to its next fulfilment status.
    ///
    /// A tracking number, when given, is kept from then on.
    #[tracing::instrument(skip(self))]
    pub fn advance(&self, order_id: &str, tracking_number: Option<String>) -> Result<TrackedOrder> {
        let id = OrderId::parse(order_id);
        let mut orders = self.write();
        let tracked = orders.get_mut(&id).ok_or_else(|| OrderError::NotFound(id.clone()))?;

        let next = tracked.status.next().ok_or(OrderError::InvalidTransition {
            status: tracked.status,
            action: "advance",
        })?;

        tracked.status = next;
        tracked.updated_at = Utc::now();
        if tracking_number.is_some() {
            tracked.tracking_number = tracking_number;
        }

        tracing::info!(status = %next, "order advanced");
        Ok(tracked.clone())
    }

    /// Cancels an order if it is still cancellable at `now`.
    #[tracing::instrument(skip(self))]
    pub fn cancel(
        &self,
        order_id: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<TrackedOrder> {
        let id = OrderId::parse(order_id);
        let mut orders = self.write();
        let tracked = orders.get_mut(&id).ok_or_else(|| OrderError::NotFound(id.clone()))?;

        tracked.check_cancellable(now, window)?;
        tracked.status = OrderStatus::Cancelled;
        tracked.cancelled_at = Some(now);
        tracked.updated_at = now;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!("order cancelled");
        Ok(tracked.clone())
    }

    /// Returns every order, newest first.
    pub fn list(&self) -> Vec<TrackedOrder> {
        let mut orders: Vec<TrackedOrder> = self.read().values().cloned().collect();
        orders.sort_by(|a, b| b.order.placed_at.cmp(&a.order.placed_at));
        orders
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<OrderId, TrackedOrder>> {
        self.orders.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<OrderId, TrackedOrder>> {
        self.orders.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use checkout::{AddressForm, PaymentMethod};
    use common::Money;
    use domain::CartItem;

    use super::*;

    fn order(placed_at: DateTime<Utc>) -> Order {
        let address = AddressForm {
            full_name: "Ravi Kumar".to_string(),
            phone: "9000011111".to_string(),
            email: "ravi@example.com".to_string(),
            address_line1: "3 Lake View".to_string(),
            city: "Hyderabad".to_string(),
            state: "Telangana".to_string(),
            pincode: "500001".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap();

        Order::new(
            OrderId::generate(placed_at),
            vec![CartItem::new("3", "Night Time Pads", Money::from_rupees(65), "", "Pads")],
            address,
            PaymentMethod::CashOnDelivery,
            placed_at,
        )
    }

    #[test]
    fn test_record_starts_confirmed() {
        let book = OrderBook::new();
        let tracked = book.record(order(Utc::now()));

        assert_eq!(tracked.status, OrderStatus::Confirmed);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let book = OrderBook::new();
        let tracked = book.record(order(Utc::now()));
        let lower = tracked.order_id().as_str().to_lowercase();

        assert_eq!(book.get(&lower).unwrap().order_id(), tracked.order_id());
        assert!(book.get("VE000000ZZZZZZ").is_none());
    }

    #[test]
    fn test_advance_to_delivered() {
        let book = OrderBook::new();
        let id = book.record(order(Utc::now())).order_id().to_string();

        book.advance(&id, None).unwrap();
        let shipped = book.advance(&id, Some("TRK789012345".to_string())).unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(shipped.tracking_number.as_deref(), Some("TRK789012345"));

        let delivered = book.advance(&id, None).unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.tracking_number.as_deref(), Some("TRK789012345"));

        assert_eq!(
            book.advance(&id, None).unwrap_err(),
            OrderError::InvalidTransition {
                status: OrderStatus::Delivered,
                action: "advance",
            }
        );
    }

    #[test]
    fn test_cancel_within_window() {
        let book = OrderBook::new();
        let placed_at = Utc::now();
        let id = book.record(order(placed_at)).order_id().to_string();

        let now = placed_at + Duration::minutes(90);
        let cancelled = book.cancel(&id, now, Duration::hours(2)).unwrap();

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.cancelled_at, Some(now));
    }

    #[test]
    fn test_cancel_after_window() {
        let book = OrderBook::new();
        let placed_at = Utc::now();
        let id = book.record(order(placed_at)).order_id().to_string();

        let now = placed_at + Duration::hours(2) + Duration::seconds(1);
        let err = book.cancel(&id, now, Duration::hours(2)).unwrap_err();

        assert!(matches!(err, OrderError::CannotCancel { .. }));
        assert_eq!(book.get(&id).unwrap().status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_cancel_shipped_order() {
        let book = OrderBook::new();
        let placed_at = Utc::now();
        let id = book.record(order(placed_at)).order_id().to_string();
        book.advance(&id, None).unwrap();
        book.advance(&id, None).unwrap();

        let err = book.cancel(&id, placed_at, Duration::hours(2)).unwrap_err();
        assert!(matches!(err, OrderError::CannotCancel { .. }));
    }

    #[test]
    fn test_list_newest_first() {
        let book = OrderBook::new();
        let earlier = Utc::now() - Duration::days(1);
        book.record(order(earlier));
        let latest = book.record(order(Utc::now()));

        assert_eq!(book.list()[0].order_id(), latest.order_id());
    }
}
