//! The checkout state machine.

use chrono::{DateTime, Utc};
use common::Money;
use domain::{CartItem, CartState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::{AddressForm, ShippingAddress};
use crate::error::{CheckoutError, Result};
use crate::events::CheckoutEvent;
use crate::order::{Order, OrderId, PaymentMethod};
use crate::state::CheckoutStep;

/// Identifies one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutId(Uuid);

impl CheckoutId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CheckoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Working state of one checkout.
///
/// Command methods validate against the current step and return the events
/// describing the transition; they never mutate. [`CheckoutFlow::apply`] is
/// the only place state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutFlow {
    id: CheckoutId,
    step: CheckoutStep,
    items: Vec<CartItem>,
    total: Money,
    item_count: u32,
    address: Option<ShippingAddress>,
    payment_method: Option<PaymentMethod>,
    processing: bool,
    order: Option<Order>,
    opened_at: DateTime<Utc>,
}

impl CheckoutFlow {
    /// Opens a checkout on a snapshot of the cart.
    ///
    /// The cart is copied; later cart changes do not affect this checkout.
    pub fn open(cart: &CartState) -> Result<Self> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let id = CheckoutId::new();
        let opened_at = Utc::now();
        let mut flow = Self {
            id,
            step: CheckoutStep::Address,
            items: Vec::new(),
            total: Money::zero(),
            item_count: 0,
            address: None,
            payment_method: None,
            processing: false,
            order: None,
            opened_at,
        };
        flow.apply(CheckoutEvent::opened(id, cart, opened_at));
        Ok(flow)
    }

    /// Applies an event. Events are facts and always apply.
    pub fn apply(&mut self, event: CheckoutEvent) {
        match event {
            CheckoutEvent::Opened(data) => {
                self.id = data.checkout_id;
                self.items = data.items;
                self.total = data.total;
                self.item_count = data.item_count;
                self.opened_at = data.opened_at;
                self.step = CheckoutStep::Address;
                self.payment_method = Some(PaymentMethod::default());
            }
            CheckoutEvent::AddressSubmitted { address } => {
                self.address = Some(address);
                self.step = CheckoutStep::Payment;
            }
            CheckoutEvent::PaymentSelected { method } => {
                self.payment_method = Some(method);
            }
            CheckoutEvent::PaymentConfirmed { method } => {
                self.payment_method = Some(method);
                self.step = CheckoutStep::Confirmation;
            }
            CheckoutEvent::SteppedBack { to, .. } => {
                self.step = to;
            }
            CheckoutEvent::ProcessingStarted { .. } => {
                self.processing = true;
            }
            CheckoutEvent::OrderPlaced { order } => {
                self.order = Some(order);
                self.processing = false;
                self.step = CheckoutStep::Success;
            }
            CheckoutEvent::Closed(_) => {
                self.step = CheckoutStep::Closed;
                self.processing = false;
                self.items.clear();
                self.total = Money::zero();
                self.item_count = 0;
                self.address = None;
                self.payment_method = None;
                self.order = None;
            }
        }
    }

    /// Applies events in order.
    pub fn apply_events(&mut self, events: impl IntoIterator<Item = CheckoutEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}

// Query methods
impl CheckoutFlow {
    pub fn id(&self) -> CheckoutId {
        self.id
    }

    /// Returns the current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Returns the cart lines being checked out.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Returns the accepted shipping address, if one was submitted.
    pub fn address(&self) -> Option<&ShippingAddress> {
        self.address.as_ref()
    }

    /// Returns the selected payment method.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Returns true while the order is being processed.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Returns the placed order once the flow reaches success.
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Returns true once the checkout has been dismissed.
    pub fn is_closed(&self) -> bool {
        self.step == CheckoutStep::Closed
    }
}

// Command methods (return events)
impl CheckoutFlow {
    /// Validates the address form and moves on to payment.
    pub fn submit_address(&self, form: &AddressForm) -> Result<Vec<CheckoutEvent>> {
        self.ensure(self.step.can_submit_address(), "submit address")?;

        let address = form.validate().map_err(CheckoutError::InvalidAddress)?;
        Ok(vec![CheckoutEvent::AddressSubmitted { address }])
    }

    /// Chooses a payment method.
    pub fn select_payment(&self, method: PaymentMethod) -> Result<Vec<CheckoutEvent>> {
        self.ensure(self.step.can_choose_payment(), "select payment")?;

        if self.payment_method == Some(method) {
            return Ok(vec![]);
        }
        Ok(vec![CheckoutEvent::PaymentSelected { method }])
    }

    /// Confirms the payment step and moves on to review.
    pub fn confirm_payment(&self) -> Result<Vec<CheckoutEvent>> {
        self.ensure(self.step.can_choose_payment(), "confirm payment")?;

        let method = self.payment_method.ok_or(CheckoutError::PaymentNotSelected)?;
        Ok(vec![CheckoutEvent::PaymentConfirmed { method }])
    }

    /// Navigates to the previous step.
    pub fn back(&self) -> Result<Vec<CheckoutEvent>> {
        if self.processing {
            return Err(CheckoutError::OrderProcessing);
        }

        let to = self
            .step
            .previous()
            .ok_or(CheckoutError::InvalidTransition {
                current_step: self.step,
                action: "go back",
            })?;
        Ok(vec![CheckoutEvent::SteppedBack {
            from: self.step,
            to,
        }])
    }

    /// Starts processing the reviewed order.
    pub fn confirm_order(&self, started_at: DateTime<Utc>) -> Result<Vec<CheckoutEvent>> {
        self.ensure(self.step.can_place_order(), "confirm order")?;
        if self.processing {
            return Err(CheckoutError::OrderProcessing);
        }

        Ok(vec![CheckoutEvent::ProcessingStarted { started_at }])
    }

    /// Places the order once processing has finished.
    pub fn place_order(
        &self,
        order_id: OrderId,
        placed_at: DateTime<Utc>,
    ) -> Result<Vec<CheckoutEvent>> {
        let ready = self.step.can_place_order() && self.processing;
        self.ensure(ready, "place order")?;

        let (Some(address), Some(method)) = (&self.address, self.payment_method) else {
            return Err(CheckoutError::InvalidTransition {
                current_step: self.step,
                action: "place order",
            });
        };

        let order = Order::new(
            order_id,
            self.items.clone(),
            address.clone(),
            method,
            placed_at,
        );
        Ok(vec![CheckoutEvent::OrderPlaced { order }])
    }

    /// Dismisses the checkout. Closing twice records nothing the second
    /// time.
    pub fn close(&self, closed_at: DateTime<Utc>) -> Vec<CheckoutEvent> {
        if self.is_closed() {
            return vec![];
        }
        vec![CheckoutEvent::closed(self.step, self.processing, closed_at)]
    }

    fn ensure(&self, allowed: bool, action: &'static str) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                current_step: self.step,
                action,
            })
        }
    }
}
