//! Async checkout session with cancellable order processing.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::{CancellationToken, ScheduledTask};
use domain::CartState;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::address::AddressForm;
use crate::completion::OrderCompletionHandler;
use crate::error::Result;
use crate::events::CheckoutEvent;
use crate::flow::{CheckoutFlow, CheckoutId};
use crate::order::{Order, OrderId, PaymentMethod};
use crate::state::CheckoutStep;

/// Default simulated order processing time.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Checkout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Time between confirming an order and it being placed.
    pub processing_delay: Duration,
}

impl CheckoutConfig {
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

/// One open checkout.
///
/// Closing the session cancels its token while holding the flow lock. The
/// processing task takes the same lock and checks the token before placing
/// the order, so once [`close`](Self::close) returns the completion handler
/// can no longer run. Dropping the session cancels the token too, abandoning
/// any order still being processed.
pub struct CheckoutSession {
    id: CheckoutId,
    flow: Arc<RwLock<CheckoutFlow>>,
    handler: Arc<dyn OrderCompletionHandler>,
    config: CheckoutConfig,
    token: CancellationToken,
    pending: Mutex<Option<ScheduledTask<Option<Order>>>>,
}

impl CheckoutSession {
    /// Opens a checkout on a snapshot of the cart.
    pub fn open(
        cart: &CartState,
        config: CheckoutConfig,
        handler: impl OrderCompletionHandler + 'static,
    ) -> Result<Self> {
        let flow = CheckoutFlow::open(cart)?;
        let id = flow.id();
        tracing::info!(
            checkout_id = %id,
            total = %flow.total(),
            items = flow.item_count(),
            "checkout opened"
        );

        Ok(Self {
            id,
            flow: Arc::new(RwLock::new(flow)),
            handler: Arc::new(handler),
            config,
            token: CancellationToken::new(),
            pending: Mutex::new(None),
        })
    }

    pub fn id(&self) -> CheckoutId {
        self.id
    }

    /// Returns the current step.
    pub async fn step(&self) -> CheckoutStep {
        self.flow.read().await.step()
    }

    /// Returns a copy of the working state.
    pub async fn snapshot(&self) -> CheckoutFlow {
        self.flow.read().await.clone()
    }

    /// Returns true once the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Submits the shipping address form.
    #[tracing::instrument(skip(self, form), fields(checkout_id = %self.id))]
    pub async fn submit_address(&self, form: &AddressForm) -> Result<()> {
        self.execute("submit address", |flow| flow.submit_address(form))
            .await
    }

    /// Chooses a payment method.
    #[tracing::instrument(skip(self), fields(checkout_id = %self.id))]
    pub async fn select_payment(&self, method: PaymentMethod) -> Result<()> {
        self.execute("select payment", |flow| flow.select_payment(method))
            .await
    }

    /// Confirms the payment step.
    #[tracing::instrument(skip(self), fields(checkout_id = %self.id))]
    pub async fn confirm_payment(&self) -> Result<()> {
        self.execute("confirm payment", CheckoutFlow::confirm_payment)
            .await
    }

    /// Navigates to the previous step and returns it.
    #[tracing::instrument(skip(self), fields(checkout_id = %self.id))]
    pub async fn back(&self) -> Result<CheckoutStep> {
        let mut flow = self.flow.write().await;
        let events = flow.back().inspect_err(|e| {
            tracing::warn!(error = %e, "rejected checkout transition");
        })?;
        flow.apply_events(events);
        Ok(flow.step())
    }

    /// Confirms the order and schedules processing.
    ///
    /// Returns as soon as processing has started. The order is placed after
    /// the configured delay unless the session is closed first; use
    /// [`settle`](Self::settle) to wait for the outcome.
    #[tracing::instrument(skip(self), fields(checkout_id = %self.id))]
    pub async fn confirm_order(&self) -> Result<()> {
        let started_at = Utc::now();
        self.execute("confirm order", |flow| flow.confirm_order(started_at))
            .await?;

        let task = ScheduledTask::spawn(
            self.config.processing_delay,
            self.token.clone(),
            complete_order(
                self.flow.clone(),
                self.handler.clone(),
                self.token.clone(),
                Instant::now(),
            ),
        );
        *self.pending.lock().await = Some(task);

        tracing::info!(delay = ?self.config.processing_delay, "order processing started");
        Ok(())
    }

    /// Closes the checkout, discarding working state and abandoning any
    /// order still being processed. The cart is not touched.
    #[tracing::instrument(skip(self), fields(checkout_id = %self.id))]
    pub async fn close(&self) {
        let mut flow = self.flow.write().await;
        self.token.cancel();

        let events = flow.close(Utc::now());
        for event in &events {
            let CheckoutEvent::Closed(data) = event else {
                continue;
            };
            if data.from == CheckoutStep::Success {
                tracing::debug!("checkout closed after success");
                continue;
            }
            metrics::counter!("checkout_cancelled_total", "step" => data.from.as_str())
                .increment(1);
            tracing::info!(
                step = %data.from,
                abandoned_processing = data.abandoned_processing,
                "checkout closed before completion"
            );
        }
        flow.apply_events(events);
    }

    /// Waits for scheduled processing to finish and returns the placed
    /// order, if any.
    ///
    /// Returns `None` when the session was closed before the order was
    /// placed.
    pub async fn settle(&self) -> Option<Order> {
        let task = self.pending.lock().await.take();
        if let Some(task) = task {
            return task.join().await.flatten();
        }
        self.flow.read().await.order().cloned()
    }

    async fn execute<F>(&self, action: &'static str, command: F) -> Result<()>
    where
        F: FnOnce(&CheckoutFlow) -> Result<Vec<CheckoutEvent>>,
    {
        let mut flow = self.flow.write().await;
        let events = command(&*flow).inspect_err(|e| {
            tracing::warn!(action, step = %flow.step(), error = %e, "rejected checkout transition");
        })?;

        for event in &events {
            tracing::debug!(event_type = event.event_type(), "applying checkout event");
        }
        flow.apply_events(events);
        Ok(())
    }
}

impl std::fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Drop for CheckoutSession {
    fn drop(&mut self) {
        if !self.token.is_cancelled() {
            tracing::debug!(checkout_id = %self.id, "checkout dropped, cancelling processing");
        }
        self.token.cancel();
    }
}

async fn complete_order(
    flow: Arc<RwLock<CheckoutFlow>>,
    handler: Arc<dyn OrderCompletionHandler>,
    token: CancellationToken,
    started: Instant,
) -> Option<Order> {
    let mut flow = flow.write().await;
    if token.is_cancelled() {
        tracing::debug!("checkout closed during processing, order not placed");
        return None;
    }

    let placed_at = Utc::now();
    let events = match flow.place_order(OrderId::generate(placed_at), placed_at) {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(error = %e, "order could not be placed");
            return None;
        }
    };
    flow.apply_events(events);
    let order = flow.order()?.clone();

    metrics::counter!("checkout_orders_placed_total").increment(1);
    metrics::histogram!("checkout_processing_seconds").record(started.elapsed().as_secs_f64());
    tracing::info!(
        order_id = %order.order_id,
        total = %order.total,
        item_count = order.item_count,
        "order placed"
    );

    handler.on_order_complete(&order);
    Some(order)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use common::{Money, Product};
    use domain::CartStore;

    use super::*;

    fn cart() -> CartState {
        let store = CartStore::new();
        store.add_item(&Product::new(
            "6",
            "Daily Panty Liners",
            Money::from_rupees(35),
            "",
            "Panty Liners",
        ));
        store.snapshot()
    }

    fn form() -> AddressForm {
        AddressForm {
            full_name: "Kavya Nair".to_string(),
            phone: "9988776655".to_string(),
            email: "kavya@example.com".to_string(),
            address_line1: "22 Marine Drive".to_string(),
            city: "Kochi".to_string(),
            state: "Kerala".to_string(),
            pincode: "682031".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_handler_runs_once_after_delay() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let session = CheckoutSession::open(&cart(), CheckoutConfig::default(), move |_: &Order| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        session.submit_address(&form()).await.unwrap();
        session.confirm_payment().await.unwrap();
        session.confirm_order().await.unwrap();
        assert_eq!(session.step().await, CheckoutStep::Confirmation);

        let order = session.settle().await.unwrap();
        assert_eq!(order.total, Money::from_rupees(35));
        assert_eq!(session.step().await, CheckoutStep::Success);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_before_delay_prevents_completion() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let session = CheckoutSession::open(&cart(), CheckoutConfig::default(), move |_: &Order| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        session.submit_address(&form()).await.unwrap();
        session.confirm_payment().await.unwrap();
        session.confirm_order().await.unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        session.close().await;

        assert!(session.settle().await.is_none());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.step().await, CheckoutStep::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_during_processing_prevents_completion() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let session = CheckoutSession::open(&cart(), CheckoutConfig::default(), move |_: &Order| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        session.submit_address(&form()).await.unwrap();
        session.confirm_payment().await.unwrap();
        session.confirm_order().await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(session);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_command_leaves_step() {
        let session =
            CheckoutSession::open(&cart(), CheckoutConfig::default(), |_: &Order| {}).unwrap();

        assert!(session.confirm_order().await.is_err());
        assert!(session.back().await.is_err());
        assert_eq!(session.step().await, CheckoutStep::Address);
    }

    #[tokio::test]
    async fn test_settle_without_processing() {
        let session =
            CheckoutSession::open(&cart(), CheckoutConfig::default(), |_: &Order| {}).unwrap();
        assert!(session.settle().await.is_none());
    }
}
