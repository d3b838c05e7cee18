//! Order tracking error types.

use checkout::OrderId;
use thiserror::Error;

use crate::status::OrderStatus;

/// Errors returned by order lookups and updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The shopper submitted a blank order id.
    #[error("Enter a valid order ID to track your order")]
    EmptyOrderId,

    /// No order has this id.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order can no longer be cancelled.
    #[error("Order {order_id} cannot be cancelled: {reason}")]
    CannotCancel {
        order_id: OrderId,
        reason: &'static str,
    },

    /// The order cannot move on from its current status.
    #[error("Cannot {action} an order that is {status}")]
    InvalidTransition {
        status: OrderStatus,
        action: &'static str,
    },

    /// The tracker shut down before the request finished.
    #[error("Request was cancelled")]
    Cancelled,
}

/// Result type for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;
