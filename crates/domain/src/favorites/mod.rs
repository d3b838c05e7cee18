//! Favorites (liked products) state and store.

mod actions;
mod item;
mod state;
mod store;

pub use actions::FavoritesAction;
pub use item::FavoriteItem;
pub use state::FavoritesState;
pub use store::FavoritesStore;
