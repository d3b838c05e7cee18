use common::{Money, Product, ProductId};
use serde::{Deserialize, Serialize};

/// A liked product. Favorites carry no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub image: String,
    pub category: String,
}

impl FavoriteItem {
    /// Creates a favorite entry from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}
