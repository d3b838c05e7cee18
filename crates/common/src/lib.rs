//! Shared types for the storefront core.
//!
//! - [`ProductId`], [`Money`] and [`Product`] value objects consumed by every
//!   other crate
//! - [`ScheduledTask`] for simulated latency that can be cancelled

pub mod schedule;
pub mod types;

pub use schedule::ScheduledTask;
pub use tokio_util::sync::CancellationToken;
pub use types::{Money, Product, ProductId};
