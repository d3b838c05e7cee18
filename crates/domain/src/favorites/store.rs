use common::{Product, ProductId};
use state_store::{Store, Subscription};

use super::{FavoriteItem, FavoritesAction, FavoritesState};

/// Handle to the session's favorites, independent of the cart.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    store: Store<FavoritesState>,
}

impl FavoritesStore {
    /// Creates an empty favorites set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Likes a product. Liking it again changes nothing.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_favorite(&self, product: &Product) {
        self.dispatch(FavoritesAction::Add {
            item: FavoriteItem::from_product(product),
        });
    }

    /// Unlikes a product.
    #[tracing::instrument(skip(self))]
    pub fn remove_favorite(&self, id: &ProductId) {
        self.dispatch(FavoritesAction::Remove { id: id.clone() });
    }

    /// Flips a product's membership and returns whether it is now a
    /// favorite.
    pub fn toggle_favorite(&self, product: &Product) -> bool {
        if self.is_favorite(&product.id) {
            self.remove_favorite(&product.id);
            false
        } else {
            self.add_favorite(product);
            true
        }
    }

    /// Returns true if the product is a favorite.
    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.store.read(|favorites| favorites.contains(id))
    }

    /// Removes every favorite.
    #[tracing::instrument(skip(self))]
    pub fn clear_favorites(&self) {
        self.dispatch(FavoritesAction::Clear);
    }

    /// Returns the number of favorites.
    pub fn item_count(&self) -> usize {
        self.store.read(FavoritesState::item_count)
    }

    /// Returns a copy of the current favorites.
    pub fn snapshot(&self) -> FavoritesState {
        self.store.state()
    }

    /// Starts observing the favorites.
    pub fn subscribe(&self) -> Subscription<FavoritesState> {
        self.store.subscribe()
    }

    fn dispatch(&self, action: FavoritesAction) {
        let name = action.as_str();
        if self.store.dispatch(action) {
            metrics::counter!("favorites_mutations_total", "action" => name).increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use common::Money;

    use super::*;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_rupees(35), "", "Liners")
    }

    #[test]
    fn test_is_favorite_follows_add_and_remove() {
        let favorites = FavoritesStore::new();
        let p = product("6");

        favorites.add_favorite(&p);
        assert!(favorites.is_favorite(&p.id));

        favorites.remove_favorite(&p.id);
        assert!(!favorites.is_favorite(&p.id));
    }

    #[test]
    fn test_toggle_alternates() {
        let favorites = FavoritesStore::new();
        let p = product("1");

        assert!(favorites.toggle_favorite(&p));
        assert_eq!(favorites.item_count(), 1);
        assert!(!favorites.toggle_favorite(&p));
        assert_eq!(favorites.item_count(), 0);
        assert!(favorites.toggle_favorite(&p));
    }

    #[test]
    fn test_clear_favorites() {
        let favorites = FavoritesStore::new();
        favorites.add_favorite(&product("1"));
        favorites.add_favorite(&product("2"));

        favorites.clear_favorites();
        assert!(favorites.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_add_does_not_notify() {
        let favorites = FavoritesStore::new();
        let p = product("1");
        favorites.add_favorite(&p);

        let sub = favorites.subscribe();
        favorites.add_favorite(&p);
        assert!(!sub.has_changed());
    }
}
