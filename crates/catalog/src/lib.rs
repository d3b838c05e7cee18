//! Product catalog for the storefront.
//!
//! The catalog is static mock data; [`ProductQuery`] reproduces the shop
//! page's search box, category and price filters and sort menu.

pub mod catalog;
pub mod query;

pub use catalog::Catalog;
pub use query::{PriceRange, ProductQuery, SortOrder};
