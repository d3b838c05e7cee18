use common::{Money, Product, ProductId};
use state_store::{Revision, Store, Subscription};

use super::{CartAction, CartItem, CartState};

/// Handle to the session's cart.
///
/// Clones share the same cart. Every mutation recomputes `total` and
/// `item_count` and wakes subscribers when something changed. Operations on
/// absent products are silent no-ops.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    store: Store<CartState>,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product, merging with an existing line.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&self, product: &Product) {
        self.dispatch(CartAction::AddItem {
            item: CartItem::from_product(product, 1),
        });
    }

    /// Adds several units of a product in one change.
    ///
    /// Used by the product page's quantity picker. Zero is a no-op.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_quantity(&self, product: &Product, quantity: u32) {
        self.dispatch(CartAction::AddItem {
            item: CartItem::from_product(product, quantity),
        });
    }

    /// Removes a product's line.
    #[tracing::instrument(skip(self))]
    pub fn remove_item(&self, id: &ProductId) {
        self.dispatch(CartAction::RemoveItem { id: id.clone() });
    }

    /// Sets a product's quantity. Zero or below removes the line; values
    /// above [`MAX_LINE_QUANTITY`](super::MAX_LINE_QUANTITY) are clamped.
    #[tracing::instrument(skip(self))]
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        });
    }

    /// Empties the cart.
    #[tracing::instrument(skip(self))]
    pub fn clear_cart(&self) {
        self.dispatch(CartAction::Clear);
    }

    /// Returns a copy of the current cart.
    pub fn snapshot(&self) -> CartState {
        self.store.state()
    }

    /// Returns the number of changes applied so far.
    pub fn revision(&self) -> Revision {
        self.store.revision()
    }

    /// Starts observing the cart.
    pub fn subscribe(&self) -> Subscription<CartState> {
        self.store.subscribe()
    }

    /// Returns the cart total.
    pub fn total(&self) -> Money {
        self.store.read(CartState::total)
    }

    /// Returns the number of units in the cart.
    pub fn item_count(&self) -> u32 {
        self.store.read(CartState::item_count)
    }

    /// Returns the quantity of a product, 0 if absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.store.read(|cart| cart.quantity_of(id))
    }

    /// Returns true if the cart has a line for this product.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.store.read(|cart| cart.contains(id))
    }

    /// Returns true if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.store.read(CartState::is_empty)
    }

    fn dispatch(&self, action: CartAction) {
        let name = action.as_str();
        if self.store.dispatch(action) {
            metrics::counter!("cart_mutations_total", "action" => name).increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_rupees(price), "", "Pads")
    }

    #[test]
    fn test_add_item_twice() {
        let cart = CartStore::new();
        let p = product("1", 45);

        cart.add_item(&p);
        cart.add_item(&p);

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.items().len(), 1);
        assert_eq!(cart.quantity_of(&p.id), 2);
        assert_eq!(cart.total(), Money::from_rupees(90));
    }

    #[test]
    fn test_add_quantity() {
        let cart = CartStore::new();
        let p = product("3", 65);

        cart.add_quantity(&p, 3);
        assert_eq!(cart.quantity_of(&p.id), 3);
        assert_eq!(cart.total(), Money::from_rupees(195));

        cart.add_quantity(&p, 0);
        assert_eq!(cart.quantity_of(&p.id), 3);
    }

    #[test]
    fn test_snapshot_is_read_only_copy() {
        let cart = CartStore::new();
        cart.add_item(&product("1", 45));

        let before = cart.snapshot();
        cart.clear_cart();

        assert_eq!(before.item_count(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_op_does_not_advance_revision() {
        let cart = CartStore::new();
        cart.add_item(&product("1", 45));
        let revision = cart.revision();

        cart.remove_item(&ProductId::new("missing"));
        cart.update_quantity(&ProductId::new("missing"), 5);

        assert_eq!(cart.revision(), revision);
        assert!(!cart.contains(&ProductId::new("missing")));
    }

    #[tokio::test]
    async fn test_subscribers_see_recomputed_totals() {
        let cart = CartStore::new();
        let mut sub = cart.subscribe();

        cart.add_item(&product("2", 55));

        let snapshot = sub.changed().await.unwrap();
        assert_eq!(snapshot.state.total(), Money::from_rupees(55));
        assert_eq!(snapshot.state.item_count(), 1);
    }
}
