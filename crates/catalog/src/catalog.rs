use common::{Money, Product, ProductId};

use crate::query::ProductQuery;

const SANITARY_PADS_IMAGE: &str = "/assets/product-sanitary-pads.jpg";
const HYGIENE_PADS_IMAGE: &str = "/assets/product-hygiene-pads.jpg";

/// Read-only product listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from a list of products, keeping their order as
    /// the featured order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Returns the storefront's built-in product range.
    pub fn mock() -> Self {
        let rupees = Money::from_rupees;
        Self::new(vec![
            Product::new(
                "1",
                "Ultra Soft Sanitary Napkins - Regular Flow",
                rupees(45),
                SANITARY_PADS_IMAGE,
                "Sanitary Napkins",
            )
            .with_original_price(rupees(60)),
            Product::new(
                "2",
                "Organic Cotton Hygiene Pads - Heavy Flow",
                rupees(55),
                HYGIENE_PADS_IMAGE,
                "Hygiene Pads",
            )
            .with_original_price(rupees(70)),
            Product::new(
                "3",
                "Night Time Protection Pads - Extra Long",
                rupees(65),
                SANITARY_PADS_IMAGE,
                "Sanitary Napkins",
            )
            .with_original_price(rupees(80)),
            Product::new(
                "4",
                "Bulk Economy Pack - 50 Pieces",
                rupees(120),
                HYGIENE_PADS_IMAGE,
                "Bulk Packs",
            )
            .with_original_price(rupees(180)),
            Product::new(
                "5",
                "Sensitive Skin Organic Pads",
                rupees(70),
                SANITARY_PADS_IMAGE,
                "Hygiene Pads",
            )
            .with_original_price(rupees(90))
            .out_of_stock(),
            Product::new(
                "6",
                "Daily Panty Liners - Pack of 30",
                rupees(35),
                HYGIENE_PADS_IMAGE,
                "Panty Liners",
            )
            .with_original_price(rupees(50)),
        ])
    }

    /// Returns every product in featured order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Returns the distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Runs a shop query and returns the matching products.
    #[tracing::instrument(skip(self))]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut matches: Vec<&Product> =
            self.products.iter().filter(|p| query.matches(p)).collect();
        query.sort_products(&mut matches);

        tracing::debug!(matches = matches.len(), "catalog query");
        matches
    }

    /// Returns up to `limit` other products in the same category.
    pub fn related(&self, id: &ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.category == product.category && &p.id != id)
            .take(limit)
            .collect()
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
