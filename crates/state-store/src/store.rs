use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{Reducer, Result, StoreError};

/// Monotonic counter of state changes applied to a store.
///
/// Starts at 0 for a fresh store and increments once per action that
/// changed the state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// The revision of a freshly created store.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Creates a revision from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the revision after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An owned, read-only copy of a store's state at a given revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<R> {
    pub revision: Revision,
    pub state: R,
}

/// Observable in-memory container for a [`Reducer`].
///
/// `Store` is a cheap handle: clones share the same state. Create one per
/// application session and pass it explicitly to whatever needs it.
pub struct Store<R: Reducer> {
    inner: Arc<watch::Sender<Snapshot<R>>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer + Default> Default for Store<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Reducer + std::fmt::Debug> std::fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &R::name())
            .field("snapshot", &*self.inner.borrow())
            .finish()
    }
}

impl<R: Reducer> Store<R> {
    /// Creates a store holding `initial`.
    pub fn new(initial: R) -> Self {
        let (sender, _) = watch::channel(Snapshot {
            revision: Revision::initial(),
            state: initial,
        });
        Self {
            inner: Arc::new(sender),
        }
    }

    /// Applies an action and notifies subscribers if the state changed.
    ///
    /// Returns true if the state changed.
    #[tracing::instrument(skip(self), fields(store = R::name()))]
    pub fn dispatch(&self, action: R::Action) -> bool {
        let changed = self.inner.send_if_modified(|snapshot| {
            if snapshot.state.reduce(action) {
                snapshot.revision = snapshot.revision.next();
                true
            } else {
                false
            }
        });

        if changed {
            tracing::debug!(revision = %self.revision(), "state changed");
        } else {
            tracing::trace!("action left state unchanged");
        }

        changed
    }

    /// Returns a copy of the current state and its revision.
    pub fn snapshot(&self) -> Snapshot<R> {
        self.inner.borrow().clone()
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> R {
        self.inner.borrow().state.clone()
    }

    /// Runs `f` against the current state without cloning it.
    ///
    /// `f` must not dispatch to this store.
    pub fn read<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.inner.borrow().state)
    }

    /// Returns the current revision.
    pub fn revision(&self) -> Revision {
        self.inner.borrow().revision
    }

    /// Starts observing this store.
    pub fn subscribe(&self) -> Subscription<R> {
        Subscription {
            receiver: self.inner.subscribe(),
        }
    }

    /// Returns the number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.receiver_count()
    }
}

/// A live view of a [`Store`].
///
/// Subscriptions observe the latest state: if several actions land between
/// two calls to [`Subscription::changed`], only the newest snapshot is
/// delivered, which is all a re-render needs.
pub struct Subscription<R: Reducer> {
    receiver: watch::Receiver<Snapshot<R>>,
}

impl<R: Reducer> Subscription<R> {
    /// Waits for the next change and returns the new snapshot.
    ///
    /// Fails with [`StoreError::Closed`] once every store handle is dropped.
    pub async fn changed(&mut self) -> Result<Snapshot<R>> {
        self.receiver
            .changed()
            .await
            .map_err(|_| StoreError::Closed(R::name()))?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Returns true if a change arrived that has not been observed yet.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Returns the latest snapshot and marks it as observed.
    pub fn current(&mut self) -> Snapshot<R> {
        self.receiver.borrow_and_update().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Tally {
        entries: Vec<String>,
    }

    #[derive(Debug)]
    enum TallyAction {
        Push(String),
        Remove(String),
    }

    impl Reducer for Tally {
        type Action = TallyAction;

        fn name() -> &'static str {
            "Tally"
        }

        fn reduce(&mut self, action: Self::Action) -> bool {
            match action {
                TallyAction::Push(entry) => {
                    self.entries.push(entry);
                    true
                }
                TallyAction::Remove(entry) => {
                    let before = self.entries.len();
                    self.entries.retain(|e| e != &entry);
                    before != self.entries.len()
                }
            }
        }
    }

    #[test]
    fn test_revision_starts_at_initial() {
        let store = Store::<Tally>::default();
        assert_eq!(store.revision(), Revision::initial());
        assert!(store.state().entries.is_empty());
    }

    #[test]
    fn test_dispatch_advances_revision_only_on_change() {
        let store = Store::<Tally>::default();

        assert!(store.dispatch(TallyAction::Push("a".into())));
        assert_eq!(store.revision(), Revision::new(1));

        assert!(!store.dispatch(TallyAction::Remove("missing".into())));
        assert_eq!(store.revision(), Revision::new(1));

        assert!(store.dispatch(TallyAction::Remove("a".into())));
        assert_eq!(store.revision(), Revision::new(2));
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::<Tally>::default();
        let handle = store.clone();

        handle.dispatch(TallyAction::Push("shared".into()));

        assert_eq!(store.read(|t| t.entries.len()), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = Store::<Tally>::default();
        store.dispatch(TallyAction::Push("a".into()));

        let snapshot = store.snapshot();
        store.dispatch(TallyAction::Push("b".into()));

        assert_eq!(snapshot.state.entries, vec!["a".to_string()]);
        assert_eq!(snapshot.revision, Revision::new(1));
    }

    #[tokio::test]
    async fn test_subscription_sees_changes() {
        let store = Store::<Tally>::default();
        let mut sub = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);
        assert!(!sub.has_changed());

        store.dispatch(TallyAction::Push("a".into()));
        assert!(sub.has_changed());

        let snapshot = sub.changed().await.unwrap();
        assert_eq!(snapshot.revision, Revision::new(1));
        assert_eq!(snapshot.state.entries, vec!["a".to_string()]);
        assert!(!sub.has_changed());
    }

    #[tokio::test]
    async fn test_subscription_not_woken_by_no_op() {
        let store = Store::<Tally>::default();
        let mut sub = store.subscribe();

        store.dispatch(TallyAction::Remove("missing".into()));
        assert!(!sub.has_changed());
        assert_eq!(sub.current().revision, Revision::initial());
    }

    #[tokio::test]
    async fn test_subscription_closed_when_store_dropped() {
        let store = Store::<Tally>::default();
        let mut sub = store.subscribe();
        drop(store);

        let result = sub.changed().await;
        assert_eq!(result.unwrap_err(), StoreError::Closed("Tally"));
    }

    #[test]
    fn test_snapshot_serialization() {
        let store = Store::<Tally>::default();
        store.dispatch(TallyAction::Push("a".into()));

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["revision"], 1);
        assert_eq!(json["state"]["entries"][0], "a");
    }
}
