//! Order book and order tracking.
//!
//! Orders placed through checkout are recorded in an [`OrderBook`].
//! [`OrderTracker`] serves the order tracking page: lookups and
//! cancellations with simulated latency, both of which stop applying once
//! the tracker is shut down.

pub mod book;
pub mod error;
pub mod status;
pub mod tracker;

pub use book::{OrderBook, TrackedOrder};
pub use error::{OrderError, Result};
pub use status::OrderStatus;
pub use tracker::{OrderTracker, TrackerConfig};
