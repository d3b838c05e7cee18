//! Storefront error types.

use checkout::CheckoutError;
use common::ProductId;
use orders::OrderError;
use thiserror::Error;

/// Errors surfaced by storefront operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The product cannot be added to the cart.
    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    /// Checkout error.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order tracking error.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// The checkout was closed before an order was placed.
    #[error("Checkout finished without placing an order")]
    NoOrderPlaced,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for storefront results.
pub type Result<T> = std::result::Result<T, StorefrontError>;
