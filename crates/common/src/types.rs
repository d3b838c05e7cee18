use serde::{Deserialize, Serialize};

/// Catalog identifier of a product.
///
/// Carts and favorites are keyed by this value, so two entries with the same
/// `ProductId` always refer to the same product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Money amount in whole currency units (rupees).
///
/// Prices in the storefront never carry a fractional part, so the amount is
/// kept as a plain integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a money amount from whole rupees.
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees)
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in rupees.
    pub const fn rupees(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a quantity, saturating at the `i64` bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 < 0 {
            write!(f, "-₹{}", self.0.abs())
        } else {
            write!(f, "₹{}", self.0)
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// A product as listed by the catalog.
///
/// This is the shape page-level components hand to the cart and favorites
/// stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// List price before the storefront discount, if any.
    pub original_price: Option<Money>,
    /// Image URI.
    pub image: String,
    pub category: String,
    pub in_stock: bool,
    pub eco_friendly: bool,
    pub certified: bool,
}

impl Product {
    /// Creates an in-stock product with no list price.
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
            original_price: None,
            image: image.into(),
            category: category.into(),
            in_stock: true,
            eco_friendly: true,
            certified: true,
        }
    }

    /// Sets the list price shown struck through next to the price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Marks the product as out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Percentage saved against the list price, rounded to the nearest whole
    /// percent. `None` when there is no list price above the price.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?.rupees();
        let price = self.price.rupees();
        if original <= 0 || original <= price {
            return None;
        }
        let saved = (original - price) as f64 / original as f64 * 100.0;
        Some(saved.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_string_conversion() {
        let id = ProductId::new("1");
        assert_eq!(id.as_str(), "1");

        let id2: ProductId = "2".into();
        assert_eq!(id2.to_string(), "2");
    }

    #[test]
    fn money_display_uses_rupee_sign() {
        assert_eq!(Money::from_rupees(145).to_string(), "₹145");
        assert_eq!(Money::zero().to_string(), "₹0");
        assert_eq!(Money::from_rupees(-5).to_string(), "-₹5");
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::from_rupees(45);
        let b = Money::from_rupees(55);

        assert_eq!((a + b).rupees(), 100);
        assert_eq!((b - a).rupees(), 10);
        assert_eq!(a.multiply(2).rupees(), 90);

        let mut c = a;
        c += b;
        assert_eq!(c.rupees(), 100);
    }

    #[test]
    fn money_arithmetic_saturates() {
        let max = Money::from_rupees(i64::MAX);

        assert_eq!(max.multiply(u32::MAX), max);
        assert_eq!(max + Money::from_rupees(1), max);
        assert_eq!(
            Money::from_rupees(i64::MIN) - Money::from_rupees(1),
            Money::from_rupees(i64::MIN)
        );

        let total: Money = [max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn money_sum() {
        let total: Money = [45, 45, 55].into_iter().map(Money::from_rupees).sum();
        assert_eq!(total, Money::from_rupees(145));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn money_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_rupees(120)).unwrap();
        assert_eq!(json, "120");
    }

    #[test]
    fn discount_percent_rounds() {
        let product = Product::new("1", "Regular Flow", Money::from_rupees(45), "a.jpg", "Pads")
            .with_original_price(Money::from_rupees(60));
        assert_eq!(product.discount_percent(), Some(25));

        let product = Product::new("4", "Bulk Pack", Money::from_rupees(120), "b.jpg", "Bulk")
            .with_original_price(Money::from_rupees(180));
        assert_eq!(product.discount_percent(), Some(33));
    }

    #[test]
    fn discount_percent_absent_without_markdown() {
        let product = Product::new("1", "Regular Flow", Money::from_rupees(45), "a.jpg", "Pads");
        assert_eq!(product.discount_percent(), None);

        let product = product.with_original_price(Money::from_rupees(45));
        assert_eq!(product.discount_percent(), None);
    }
}
