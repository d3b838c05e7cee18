use common::{Money, Product, ProductId};
use serde::{Deserialize, Serialize};

/// A line in the cart: one product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Money,
    pub image: String,
    pub category: String,
    /// Always at least 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart line with a quantity of 1.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            category: category.into(),
            quantity: 1,
        }
    }

    /// Creates a cart line for `quantity` units of a catalog product.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Returns a copy with a different quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}
