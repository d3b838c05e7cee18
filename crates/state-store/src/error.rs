use thiserror::Error;

/// Errors that can occur when observing a store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Every handle to the store has been dropped; no further changes will
    /// arrive.
    #[error("Store {0} has been closed")]
    Closed(&'static str),
}

/// Result type for store observation.
pub type Result<T> = std::result::Result<T, StoreError>;
