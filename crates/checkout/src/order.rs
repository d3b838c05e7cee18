//! Placed orders and their identifiers.

use chrono::{DateTime, Duration, Utc};
use common::Money;
use domain::CartItem;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::address::ShippingAddress;

/// Days between placing an order and its estimated delivery.
pub const ESTIMATED_DELIVERY_DAYS: i64 = 3;

const ORDER_ID_PREFIX: &str = "VE";
const ORDER_ID_SUFFIX_LEN: usize = 6;
const ORDER_ID_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Human-shareable order identifier, e.g. `VE482913K7Q2ZD`.
///
/// Made of a fixed prefix, the last six digits of the millisecond timestamp
/// and six random characters from `[0-9A-Z]`. Unique enough for a single
/// session; not suitable as a security token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generates an identifier for an order placed at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self::generate_with(now, &mut rand::rng())
    }

    /// Generates an identifier using the given random source.
    pub fn generate_with<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let millis = now.timestamp_millis().rem_euclid(1_000_000);
        let suffix: String = (0..ORDER_ID_SUFFIX_LEN)
            .map(|_| ORDER_ID_ALPHABET[rng.random_range(0..ORDER_ID_ALPHABET.len())] as char)
            .collect();

        Self(format!("{ORDER_ID_PREFIX}{millis:06}{suffix}"))
    }

    /// Wraps a shopper-entered identifier, normalised to upper case.
    pub fn parse(id: &str) -> Self {
        Self(id.trim().to_uppercase())
    }

    /// Returns true if the identifier follows the generated format.
    pub fn is_well_formed(&self) -> bool {
        let Some(rest) = self.0.strip_prefix(ORDER_ID_PREFIX) else {
            return false;
        };
        if rest.len() != 6 + ORDER_ID_SUFFIX_LEN || !rest.is_ascii() {
            return false;
        }
        let (digits, suffix) = rest.split_at(6);

        digits.bytes().all(|b| b.is_ascii_digit())
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the confirmation page path for an order.
pub fn confirmation_path(order_id: &OrderId) -> String {
    format!("/order-confirmation?orderId={order_id}")
}

/// How the shopper pays. Cash on delivery is the only method offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Every method the payment step offers.
    pub const ALL: [PaymentMethod; 1] = [PaymentMethod::CashOnDelivery];

    /// Returns the method's identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
        }
    }

    /// Returns the name shown to shoppers.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Pay when your order arrives",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    /// The cart lines at the time checkout opened.
    pub items: Vec<CartItem>,
    pub total: Money,
    pub item_count: u32,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
    /// Always `placed_at` plus [`ESTIMATED_DELIVERY_DAYS`].
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// Assembles an order from checkout state.
    pub fn new(
        order_id: OrderId,
        items: Vec<CartItem>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let total = items.iter().map(CartItem::line_total).sum();
        let item_count = items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity));

        Self {
            order_id,
            items,
            total,
            item_count,
            shipping_address,
            payment_method,
            placed_at,
            estimated_delivery: placed_at + Duration::days(ESTIMATED_DELIVERY_DAYS),
        }
    }

    /// Returns the confirmation page path for this order.
    pub fn confirmation_path(&self) -> String {
        confirmation_path(&self.order_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::address::AddressForm;

    fn address() -> ShippingAddress {
        AddressForm {
            full_name: "Asha Rao".to_string(),
            phone: "9000000000".to_string(),
            email: "asha@example.com".to_string(),
            address_line1: "4 Park Street".to_string(),
            city: "Kolkata".to_string(),
            state: "West Bengal".to_string(),
            pincode: "700016".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_generated_id_format() {
        let now = Utc.timestamp_millis_opt(1_718_000_123_456).unwrap();
        let id = OrderId::generate(now);

        assert_eq!(id.as_str().len(), 14);
        assert!(id.as_str().starts_with("VE123456"));
        assert!(id.is_well_formed());
    }

    #[test]
    fn test_timestamp_slice_keeps_leading_zeros() {
        let now = Utc.timestamp_millis_opt(1_718_000_000_042).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let id = OrderId::generate_with(now, &mut rng);

        assert!(id.as_str().starts_with("VE000042"));
        assert!(id.is_well_formed());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let now = Utc::now();
        let a = OrderId::generate_with(now, &mut StdRng::seed_from_u64(42));
        let b = OrderId::generate_with(now, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_normalises_case() {
        let id = OrderId::parse(" ve123456abc123 ");
        assert_eq!(id.as_str(), "VE123456ABC123");
        assert!(id.is_well_formed());
    }

    #[test]
    fn test_malformed_ids() {
        assert!(!OrderId::parse("").is_well_formed());
        assert!(!OrderId::parse("XX123456ABC123").is_well_formed());
        assert!(!OrderId::parse("VE12345").is_well_formed());
        assert!(!OrderId::parse("VE123456ABC12!").is_well_formed());
        assert!(!OrderId::parse("VE123456ABC1234").is_well_formed());
    }

    #[test]
    fn test_confirmation_path() {
        let id = OrderId::parse("VE123456ABC123");
        assert_eq!(
            confirmation_path(&id),
            "/order-confirmation?orderId=VE123456ABC123"
        );
    }

    #[test]
    fn test_payment_method_wire_name() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"cash-on-delivery\"");
        assert_eq!(PaymentMethod::CashOnDelivery.as_str(), "cash-on-delivery");
        assert_eq!(PaymentMethod::CashOnDelivery.to_string(), "Cash on Delivery");
    }

    #[test]
    fn test_order_totals_and_delivery() {
        let placed_at = Utc::now();
        let items = vec![
            CartItem::new("1", "Regular Flow", Money::from_rupees(45), "", "Pads").with_quantity(2),
            CartItem::new("2", "Heavy Flow", Money::from_rupees(55), "", "Pads"),
        ];
        let order = Order::new(
            OrderId::generate(placed_at),
            items,
            address(),
            PaymentMethod::CashOnDelivery,
            placed_at,
        );

        assert_eq!(order.total, Money::from_rupees(145));
        assert_eq!(order.item_count, 3);
        assert_eq!(order.estimated_delivery - order.placed_at, Duration::days(3));
    }
}
