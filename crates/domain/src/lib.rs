//! Cart and favorites state for the storefront.
//!
//! This crate provides:
//! - [`CartState`] and [`FavoritesState`], reducers with derived totals
//! - [`CartStore`] and [`FavoritesStore`], the typed handles presentation
//!   code mutates and observes

pub mod cart;
pub mod favorites;

pub use cart::{CartAction, CartItem, CartState, CartStore, MAX_LINE_QUANTITY};
pub use favorites::{FavoriteItem, FavoritesAction, FavoritesState, FavoritesStore};
