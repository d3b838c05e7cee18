use common::ProductId;

use super::CartItem;

/// Mutations accepted by [`CartState`](super::CartState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Adds `item.quantity` units. Merges into an existing line with the
    /// same id.
    AddItem { item: CartItem },

    /// Removes the line for this product.
    RemoveItem { id: ProductId },

    /// Sets the quantity of an existing line. Zero or below removes it.
    UpdateQuantity { id: ProductId, quantity: i64 },

    /// Empties the cart.
    Clear,
}

impl CartAction {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "add_item",
            CartAction::RemoveItem { .. } => "remove_item",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::Clear => "clear",
        }
    }
}
