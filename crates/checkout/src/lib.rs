//! Checkout wizard for the storefront.
//!
//! A checkout walks the shopper through four steps:
//! 1. Shipping address
//! 2. Payment method
//! 3. Order review
//! 4. Success, once the simulated processing delay has elapsed
//!
//! [`CheckoutFlow`] is the synchronous state machine. Commands return
//! [`CheckoutEvent`]s which are applied through [`CheckoutFlow::apply`].
//! [`CheckoutSession`] wraps a flow for async callers, schedules order
//! processing and guarantees a closed session never completes an order.

pub mod address;
pub mod completion;
pub mod error;
pub mod events;
pub mod flow;
pub mod order;
pub mod session;
pub mod state;

pub use address::{AddressErrors, AddressField, AddressForm, INDIAN_STATES, ShippingAddress};
pub use completion::OrderCompletionHandler;
pub use error::{CheckoutError, Result};
pub use events::CheckoutEvent;
pub use flow::{CheckoutFlow, CheckoutId};
pub use order::{ESTIMATED_DELIVERY_DAYS, Order, OrderId, PaymentMethod, confirmation_path};
pub use session::{CheckoutConfig, CheckoutSession};
pub use state::CheckoutStep;
