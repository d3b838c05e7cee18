//! Order fulfilment status.

use serde::{Deserialize, Serialize};

/// Where a placed order is in fulfilment.
///
/// Status transitions:
/// ```text
/// Confirmed ──► Processing ──► Shipped ──► Delivered
///     │              │
///     └──────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed and confirmed.
    #[default]
    Confirmed,

    /// Order is being packed.
    Processing,

    /// Order handed to the courier.
    Shipped,

    /// Order delivered (terminal state).
    Delivered,

    /// Order cancelled by the shopper (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns the next fulfilment status, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Returns true if the order has not shipped yet.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Processing)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Returns the label shown on the tracking timeline.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Order Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
