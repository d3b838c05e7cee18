use common::ProductId;
use serde::Serialize;
use state_store::Reducer;

use super::{FavoriteItem, FavoritesAction};

/// The set of liked products, in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FavoritesState {
    items: Vec<FavoriteItem>,
    /// Always equal to `items.len()`.
    item_count: usize,
}

impl Reducer for FavoritesState {
    type Action = FavoritesAction;

    fn name() -> &'static str {
        "Favorites"
    }

    fn reduce(&mut self, action: Self::Action) -> bool {
        let changed = match action {
            FavoritesAction::Add { item } => {
                if self.contains(&item.id) {
                    false
                } else {
                    self.items.push(item);
                    true
                }
            }
            FavoritesAction::Remove { id } => {
                let before = self.items.len();
                self.items.retain(|item| item.id != id);
                self.items.len() != before
            }
            FavoritesAction::Clear => {
                let had_items = !self.items.is_empty();
                self.items.clear();
                had_items
            }
        };

        if changed {
            self.item_count = self.items.len();
        }
        changed
    }
}

impl FavoritesState {
    /// Returns the favorites in the order they were added.
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    /// Returns the number of favorites.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns true if the product is a favorite.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Returns true if there are no favorites.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use common::{Money, Product};

    use super::*;

    fn favorite(id: &str) -> FavoriteItem {
        FavoriteItem::from_product(
            &Product::new(id, format!("Product {id}"), Money::from_rupees(45), "", "Pads")
                .with_original_price(Money::from_rupees(60)),
        )
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut state = FavoritesState::default();
        assert!(state.reduce(FavoritesAction::Add {
            item: favorite("1")
        }));
        assert!(!state.reduce(FavoritesAction::Add {
            item: favorite("1")
        }));

        assert_eq!(state.item_count(), 1);
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut state = FavoritesState::default();
        state.reduce(FavoritesAction::Add {
            item: favorite("1"),
        });
        state.reduce(FavoritesAction::Add {
            item: favorite("2"),
        });

        assert!(state.reduce(FavoritesAction::Remove {
            id: ProductId::new("1")
        }));
        assert!(!state.contains(&ProductId::new("1")));
        assert_eq!(state.item_count(), 1);

        assert!(!state.reduce(FavoritesAction::Remove {
            id: ProductId::new("1")
        }));
    }

    #[test]
    fn test_clear() {
        let mut state = FavoritesState::default();
        state.reduce(FavoritesAction::Add {
            item: favorite("1"),
        });

        assert!(state.reduce(FavoritesAction::Clear));
        assert!(state.is_empty());
        assert_eq!(state.item_count(), 0);
        assert!(!state.reduce(FavoritesAction::Clear));
    }

    #[test]
    fn test_keeps_original_price() {
        let mut state = FavoritesState::default();
        state.reduce(FavoritesAction::Add {
            item: favorite("1"),
        });

        assert_eq!(
            state.items()[0].original_price,
            Some(Money::from_rupees(60))
        );
    }
}
