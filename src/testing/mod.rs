//! Headless testing helpers: Pilot, layout dumps.
//!
//! Use the [`Pilot`] to drive a [`Session`](crate::session::Session) by element
//! id without any host surface. Use [`layout_to_string`] to capture the laid-out
//! tree as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{format_box, layout_to_string};
