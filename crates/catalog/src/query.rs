//! Shop page filters.

use common::{Money, Product};
use serde::{Deserialize, Serialize};

/// Price buckets offered by the shop filter. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    /// ₹0 to ₹50.
    Under50,
    /// ₹50 to ₹100.
    From50To100,
    /// ₹100 to ₹200.
    From100To200,
}

impl PriceRange {
    /// Returns the inclusive bounds of the bucket.
    pub fn bounds(&self) -> (Money, Money) {
        let (min, max) = match self {
            PriceRange::Under50 => (0, 50),
            PriceRange::From50To100 => (50, 100),
            PriceRange::From100To200 => (100, 200),
        };
        (Money::from_rupees(min), Money::from_rupees(max))
    }

    /// Returns true if the price falls in the bucket.
    pub fn contains(&self, price: Money) -> bool {
        let (min, max) = self.bounds();
        price >= min && price <= max
    }

    /// Returns the filter's label.
    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Under50 => "Under ₹50",
            PriceRange::From50To100 => "₹50 - ₹100",
            PriceRange::From100To200 => "₹100 - ₹200",
        }
    }
}

/// Sort menu options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    /// Alphabetical by name.
    Name,
}

/// A combination of shop filters. The default matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name or category.
    pub search: Option<String>,
    /// Exact category; `None` means all categories.
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Creates a query matching everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by a search term. Blank terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    /// Filters by category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters by price bucket.
    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Sets the sort order.
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true if the product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !product.name.to_lowercase().contains(&term)
                && !product.category.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|category| &product.category == category);
        let price_ok = self
            .price_range
            .is_none_or(|range| range.contains(product.price));

        category_ok && price_ok
    }

    /// Orders matching products in place. Sorting is stable, so ties keep
    /// catalog order.
    pub fn sort_products(&self, products: &mut [&Product]) {
        match self.sort {
            SortOrder::Featured => {}
            SortOrder::PriceLowToHigh => products.sort_by_key(|p| p.price),
            SortOrder::PriceHighToLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
        }
    }
}
