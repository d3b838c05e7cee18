//! Order completion callback.

use crate::order::Order;

/// Receives each order a checkout places.
///
/// Called exactly once per successful checkout, while the session still
/// holds its flow lock, so implementations must not call back into the same
/// [`CheckoutSession`](crate::CheckoutSession). Closures implement this
/// trait.
pub trait OrderCompletionHandler: Send + Sync {
    /// Handles a placed order.
    fn on_order_complete(&self, order: &Order);
}

impl<F> OrderCompletionHandler for F
where
    F: Fn(&Order) + Send + Sync,
{
    fn on_order_complete(&self, order: &Order) {
        self(order)
    }
}
