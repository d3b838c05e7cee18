//! Checkout step machine.

use serde::{Deserialize, Serialize};

/// The step a checkout is on.
///
/// Step transitions:
/// ```text
/// Address ◄──► Payment ◄──► Confirmation ──► Success
///    │            │              │              │
///    └────────────┴──────────────┴──────────────┴──► Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Collecting the shipping address.
    #[default]
    Address,

    /// Choosing how to pay.
    Payment,

    /// Reviewing the order before placing it.
    Confirmation,

    /// The order has been placed (terminal state).
    Success,

    /// The checkout was dismissed (terminal state).
    Closed,
}

impl CheckoutStep {
    /// Returns true if a shipping address can be submitted.
    pub fn can_submit_address(&self) -> bool {
        matches!(self, CheckoutStep::Address)
    }

    /// Returns true if the payment method can be chosen or confirmed.
    pub fn can_choose_payment(&self) -> bool {
        matches!(self, CheckoutStep::Payment)
    }

    /// Returns true if the order can be placed.
    pub fn can_place_order(&self) -> bool {
        matches!(self, CheckoutStep::Confirmation)
    }

    /// Returns the step reached by navigating back, if any.
    pub fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Payment => Some(CheckoutStep::Address),
            CheckoutStep::Confirmation => Some(CheckoutStep::Payment),
            _ => None,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStep::Success | CheckoutStep::Closed)
    }

    /// Returns the step name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "Address",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmation => "Confirmation",
            CheckoutStep::Success => "Success",
            CheckoutStep::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
