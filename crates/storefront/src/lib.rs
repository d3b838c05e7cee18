//! Storefront application wiring.
//!
//! [`Storefront`] owns one of each store for the session and connects
//! checkout completion to the cart and the order book.

pub mod config;
pub mod error;

use catalog::Catalog;
use checkout::{CheckoutSession, Order};
use common::{Product, ProductId};
use domain::{CartStore, FavoritesStore};
use orders::{OrderBook, OrderTracker};

pub use config::{Config, LogFormat};
pub use error::{Result, StorefrontError};

/// The shopper's session: catalog, cart, favorites and placed orders.
///
/// Created once at start-up and passed to whatever needs it. Store handles
/// returned by the accessors share state with the storefront.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: CartStore,
    favorites: FavoritesStore,
    orders: OrderBook,
    tracker: OrderTracker,
    config: Config,
}

impl Storefront {
    /// Creates a storefront over the built-in catalog.
    pub fn new(config: Config) -> Self {
        Self::with_catalog(Catalog::mock(), config)
    }

    /// Creates a storefront over a custom catalog.
    pub fn with_catalog(catalog: Catalog, config: Config) -> Self {
        let orders = OrderBook::new();
        let tracker = OrderTracker::new(orders.clone(), config.tracker);

        Self {
            catalog,
            cart: CartStore::new(),
            favorites: FavoritesStore::new(),
            orders,
            tracker,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn tracker(&self) -> &OrderTracker {
        &self.tracker
    }

    /// Adds units of a catalog product to the cart.
    #[tracing::instrument(skip(self))]
    pub fn add_to_cart(&self, id: &ProductId, quantity: u32) -> Result<()> {
        let product = self.product(id)?;
        if !product.in_stock {
            metrics::counter!("cart_rejections_total", "reason" => "out_of_stock").increment(1);
            return Err(StorefrontError::OutOfStock(id.clone()));
        }

        self.cart.add_quantity(product, quantity);
        Ok(())
    }

    /// Flips a catalog product's favorite status and returns the new status.
    #[tracing::instrument(skip(self))]
    pub fn toggle_favorite(&self, id: &ProductId) -> Result<bool> {
        let product = self.product(id)?;
        Ok(self.favorites.toggle_favorite(product))
    }

    /// Opens a checkout on the current cart.
    ///
    /// When the order is placed the cart is cleared and the order is
    /// recorded in the order book. Closing the checkout leaves the cart as
    /// it was.
    pub fn open_checkout(&self) -> Result<CheckoutSession> {
        let cart = self.cart.clone();
        let orders = self.orders.clone();
        let on_complete = move |order: &Order| {
            cart.clear_cart();
            orders.record(order.clone());
            tracing::info!(
                order_id = %order.order_id,
                path = %order.confirmation_path(),
                "redirecting to order confirmation"
            );
        };

        let session =
            CheckoutSession::open(&self.cart.snapshot(), self.config.checkout, on_complete)?;
        metrics::counter!("checkout_opened_total").increment(1);
        Ok(session)
    }

    /// Stops pending order lookups and cancellations.
    pub fn shutdown(&self) {
        self.tracker.shutdown();
    }

    fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorefrontError::UnknownProduct(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use common::Money;

    use super::*;

    #[test]
    fn test_add_to_cart_uses_catalog_price() {
        let storefront = Storefront::new(Config::default());
        storefront.add_to_cart(&ProductId::new("4"), 2).unwrap();

        assert_eq!(storefront.cart().total(), Money::from_rupees(240));
        assert_eq!(storefront.cart().item_count(), 2);
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let storefront = Storefront::new(Config::default());
        let err = storefront.add_to_cart(&ProductId::new("5"), 1).unwrap_err();

        assert!(matches!(err, StorefrontError::OutOfStock(_)));
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_unknown_product_rejected() {
        let storefront = Storefront::new(Config::default());
        assert!(matches!(
            storefront.toggle_favorite(&ProductId::new("42")),
            Err(StorefrontError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_toggle_favorite_by_id() {
        let storefront = Storefront::new(Config::default());
        let id = ProductId::new("5");

        assert!(storefront.toggle_favorite(&id).unwrap());
        assert!(storefront.favorites().is_favorite(&id));
        assert!(!storefront.toggle_favorite(&id).unwrap());
    }

    #[test]
    fn test_open_checkout_with_empty_cart() {
        let storefront = Storefront::new(Config::default());
        assert!(matches!(
            storefront.open_checkout(),
            Err(StorefrontError::Checkout(checkout::CheckoutError::EmptyCart))
        ));
    }
}
