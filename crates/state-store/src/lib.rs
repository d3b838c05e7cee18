//! Observable in-memory state containers.
//!
//! A [`Store`] owns one value implementing [`Reducer`]. All changes go
//! through [`Store::dispatch`]; readers take owned [`Snapshot`]s or follow
//! changes through a [`Subscription`].

pub mod error;
pub mod reducer;
pub mod store;

pub use error::{Result, StoreError};
pub use reducer::Reducer;
pub use store::{Revision, Snapshot, Store, Subscription};
