//! Shopping cart state and store.

mod actions;
mod item;
mod state;
mod store;

pub use actions::CartAction;
pub use item::CartItem;
pub use state::{CartState, MAX_LINE_QUANTITY};
pub use store::CartStore;
