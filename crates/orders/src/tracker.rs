//! Order tracking page operations.

use std::time::Duration;

use checkout::OrderId;
use chrono::{DateTime, Utc};
use common::{CancellationToken, ScheduledTask};

use crate::book::{OrderBook, TrackedOrder};
use crate::error::{OrderError, Result};

/// Order tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Simulated latency of an order lookup.
    pub lookup_delay: Duration,
    /// Simulated latency of a cancellation.
    pub cancel_delay: Duration,
    /// How long after placement an order may be cancelled.
    pub cancellation_window: chrono::Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lookup_delay: Duration::from_millis(1000),
            cancel_delay: Duration::from_millis(1000),
            cancellation_window: chrono::Duration::hours(2),
        }
    }
}

/// Looks up and cancels orders with simulated latency.
///
/// Requests still waiting out their delay when the tracker is shut down
/// never apply.
#[derive(Debug, Clone)]
pub struct OrderTracker {
    book: OrderBook,
    config: TrackerConfig,
    token: CancellationToken,
}

impl OrderTracker {
    /// Creates a tracker over an order book.
    pub fn new(book: OrderBook, config: TrackerConfig) -> Self {
        Self {
            book,
            config,
            token: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Finds an order by the id a shopper typed.
    #[tracing::instrument(skip(self))]
    pub async fn track(&self, order_id: &str) -> Result<TrackedOrder> {
        let order_id = order_id.trim().to_string();
        if order_id.is_empty() {
            return Err(OrderError::EmptyOrderId);
        }

        let book = self.book.clone();
        let lookup_id = order_id.clone();
        let task = ScheduledTask::spawn(
            self.config.lookup_delay,
            self.token.child_token(),
            async move { book.get(&lookup_id) },
        );

        let found = task.join().await.ok_or(OrderError::Cancelled)?;
        let result = found.ok_or_else(|| OrderError::NotFound(OrderId::parse(&order_id)));

        let outcome = if result.is_ok() { "found" } else { "not_found" };
        metrics::counter!("order_lookups_total", "outcome" => outcome).increment(1);
        result
    }

    /// Cancels an order on the shopper's behalf.
    ///
    /// Eligibility is checked before the delay so the shopper gets an
    /// immediate answer, and again when the cancellation applies.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, order_id: &str, now: DateTime<Utc>) -> Result<TrackedOrder> {
        let window = self.config.cancellation_window;
        let tracked = self
            .book
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(OrderId::parse(order_id)))?;
        tracked.check_cancellable(now, window)?;

        let book = self.book.clone();
        let cancel_id = order_id.to_string();
        let task = ScheduledTask::spawn(
            self.config.cancel_delay,
            self.token.child_token(),
            async move { book.cancel(&cancel_id, now, window) },
        );

        match task.join().await {
            Some(result) => result,
            None => {
                tracing::info!("order cancellation abandoned");
                Err(OrderError::Cancelled)
            }
        }
    }

    /// Returns true if the order may still be cancelled at `now`.
    pub fn can_cancel(&self, tracked: &TrackedOrder, now: DateTime<Utc>) -> bool {
        tracked.can_cancel(now, self.config.cancellation_window)
    }

    /// Abandons every request still waiting out its delay.
    pub fn shutdown(&self) {
        self.token.cancel();
    }
}
