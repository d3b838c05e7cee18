//! Checkout error types.

use thiserror::Error;

use crate::address::AddressErrors;
use crate::state::CheckoutStep;

/// Errors that can occur while driving a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout was opened with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The shipping address form has missing fields.
    #[error("Invalid shipping address: {0}")]
    InvalidAddress(AddressErrors),

    /// The action is not allowed on the current step.
    #[error("Cannot {action} during the {current_step} step")]
    InvalidTransition {
        current_step: CheckoutStep,
        action: &'static str,
    },

    /// Payment was confirmed without choosing a method.
    #[error("No payment method selected")]
    PaymentNotSelected,

    /// The order is already being processed.
    #[error("Order is already being processed")]
    OrderProcessing,
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
