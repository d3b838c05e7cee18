use common::ProductId;

use super::FavoriteItem;

/// Mutations accepted by [`FavoritesState`](super::FavoritesState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    /// Adds the product unless it is already a favorite.
    Add { item: FavoriteItem },

    /// Removes the product if present.
    Remove { id: ProductId },

    /// Removes every favorite.
    Clear,
}

impl FavoritesAction {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoritesAction::Add { .. } => "add",
            FavoritesAction::Remove { .. } => "remove",
            FavoritesAction::Clear => "clear",
        }
    }
}
