//! Checkout transition events.

use chrono::{DateTime, Utc};
use common::Money;
use domain::{CartItem, CartState};
use serde::{Deserialize, Serialize};

use crate::address::ShippingAddress;
use crate::flow::CheckoutId;
use crate::order::{Order, PaymentMethod};
use crate::state::CheckoutStep;

/// Facts recorded as a checkout moves between steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CheckoutEvent {
    /// Checkout opened on a snapshot of the cart.
    Opened(OpenedData),

    /// A valid shipping address was entered.
    AddressSubmitted { address: ShippingAddress },

    /// A payment method was chosen.
    PaymentSelected { method: PaymentMethod },

    /// The payment step was confirmed.
    PaymentConfirmed { method: PaymentMethod },

    /// The shopper navigated to an earlier step.
    SteppedBack { from: CheckoutStep, to: CheckoutStep },

    /// The shopper confirmed the order and processing began.
    ProcessingStarted { started_at: DateTime<Utc> },

    /// Processing finished and the order was placed.
    OrderPlaced { order: Order },

    /// The checkout was dismissed.
    Closed(ClosedData),
}

impl CheckoutEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            CheckoutEvent::Opened(_) => "Opened",
            CheckoutEvent::AddressSubmitted { .. } => "AddressSubmitted",
            CheckoutEvent::PaymentSelected { .. } => "PaymentSelected",
            CheckoutEvent::PaymentConfirmed { .. } => "PaymentConfirmed",
            CheckoutEvent::SteppedBack { .. } => "SteppedBack",
            CheckoutEvent::ProcessingStarted { .. } => "ProcessingStarted",
            CheckoutEvent::OrderPlaced { .. } => "OrderPlaced",
            CheckoutEvent::Closed(_) => "Closed",
        }
    }
}

/// Data for the Opened event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedData {
    pub checkout_id: CheckoutId,
    /// Cart lines copied at open time.
    pub items: Vec<CartItem>,
    pub total: Money,
    pub item_count: u32,
    pub opened_at: DateTime<Utc>,
}

/// Data for the Closed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedData {
    /// The step the checkout was on when it closed.
    pub from: CheckoutStep,
    /// True if an order was being processed and has been abandoned.
    pub abandoned_processing: bool,
    pub closed_at: DateTime<Utc>,
}

// Convenience constructors
impl CheckoutEvent {
    /// Creates an Opened event from a cart snapshot.
    pub fn opened(checkout_id: CheckoutId, cart: &CartState, opened_at: DateTime<Utc>) -> Self {
        CheckoutEvent::Opened(OpenedData {
            checkout_id,
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
            opened_at,
        })
    }

    /// Creates a Closed event.
    pub fn closed(
        from: CheckoutStep,
        abandoned_processing: bool,
        closed_at: DateTime<Utc>,
    ) -> Self {
        CheckoutEvent::Closed(ClosedData {
            from,
            abandoned_processing,
            closed_at,
        })
    }
}
