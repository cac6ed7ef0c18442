//! Reactive data: dependency-tracked views over plain [`Value`](crate::value::Value) maps.
//!
//! - [`ReactiveStore::wrap`] interns a mapping and returns a [`TrackedView`].
//! - [`ReactiveStore::subscribe`] / [`ReactiveStore::effect`] register callbacks.
//! - [`ReactiveStore::with_tracking`] records which cells a computation reads.
//! - Writing through a view replays every subscriber recorded on that cell.
//!
//! ```ignore
//! let store = ReactiveStore::new();
//! let data = store.wrap(Value::map().with("count", 0))?;
//! let reader = data.clone();
//! store.effect(move || {
//!     println!("count = {}", reader.get_value("count"));
//!     Ok(())
//! })?;
//! data.set("count", 1)?; // prints "count = 1"
//! ```

pub mod store;
pub mod view;

pub use store::{Callback, ObjectId, ReactiveStore, SubscriberId, DEFAULT_MAX_DEPTH};
pub use view::{Tracked, TrackedView};

/// Errors raised by the reactive runtime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReactiveError {
    /// A write re-entered a running subscriber, or notifications nested past
    /// the configured depth.
    #[error("write cycle on '{field}' at notification depth {depth}")]
    WriteCycle { field: String, depth: usize },
    #[error("'{0}' is not an object")]
    NotAnObject(String),
    #[error("unknown subscriber {0:?}")]
    UnknownSubscriber(SubscriberId),
}
