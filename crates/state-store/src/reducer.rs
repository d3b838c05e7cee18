//! The reducer contract implemented by every piece of store state.

/// State that changes only by applying actions.
///
/// `reduce` must be deterministic and must not perform I/O. It returns
/// whether the action changed the state; returning `false` lets the store
/// skip notifying subscribers for no-op actions (removing an absent entry,
/// adding a favorite twice, and so on).
pub trait Reducer: Clone + Send + Sync + 'static {
    /// The actions this state accepts.
    type Action: std::fmt::Debug + Send;

    /// Name used in logs and error messages.
    fn name() -> &'static str;

    /// Applies an action. Returns true if the state changed.
    fn reduce(&mut self, action: Self::Action) -> bool;

    /// Applies several actions in order. Returns true if any changed the
    /// state.
    fn reduce_all(&mut self, actions: impl IntoIterator<Item = Self::Action>) -> bool {
        let mut changed = false;
        for action in actions {
            changed |= self.reduce(action);
        }
        changed
    }
}
