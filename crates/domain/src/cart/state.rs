use common::{Money, ProductId};
use serde::Serialize;
use state_store::Reducer;

use super::{CartAction, CartItem};

/// Most units a single cart line can hold. Larger quantities are clamped.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Contents of the cart.
///
/// `total` and `item_count` are derived from `items` and recomputed after
/// every change; there is no way to set them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    /// Lines in the order they were first added.
    items: Vec<CartItem>,

    /// Σ price × quantity.
    total: Money,

    /// Σ quantity.
    item_count: u32,
}

impl Reducer for CartState {
    type Action = CartAction;

    fn name() -> &'static str {
        "Cart"
    }

    fn reduce(&mut self, action: Self::Action) -> bool {
        let changed = match action {
            CartAction::AddItem { item } => self.apply_add_item(item),
            CartAction::RemoveItem { id } => self.apply_remove_item(&id),
            CartAction::UpdateQuantity { id, quantity } => {
                self.apply_update_quantity(&id, quantity)
            }
            CartAction::Clear => self.apply_clear(),
        };

        if changed {
            self.recalculate_totals();
        }
        changed
    }
}

// Query methods
impl CartState {
    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the cart total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Returns the line for a product.
    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Returns the quantity of a product, 0 if absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get_item(id).map_or(0, |item| item.quantity)
    }

    /// Returns true if the cart has a line for this product.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get_item(id).is_some()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Apply helpers
impl CartState {
    fn apply_add_item(&mut self, item: CartItem) -> bool {
        if item.quantity == 0 {
            return false;
        }

        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                let quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_LINE_QUANTITY);
                if quantity == existing.quantity {
                    return false;
                }
                existing.quantity = quantity;
            }
            None => {
                let quantity = item.quantity.min(MAX_LINE_QUANTITY);
                self.items.push(item.with_quantity(quantity));
            }
        }
        true
    }

    fn apply_remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    fn apply_update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.apply_remove_item(id);
        }

        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };

        let quantity = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .min(MAX_LINE_QUANTITY);
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        true
    }

    fn apply_clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }

    fn recalculate_totals(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
        self.item_count = self
            .items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity));
        tracing::debug!(
            total = %self.total,
            item_count = self.item_count,
            lines = self.items.len(),
            "cart totals recalculated"
        );
    }
}
