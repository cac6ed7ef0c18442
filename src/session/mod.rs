//! Orchestration: bindings, configuration, and the live [`Session`].

pub mod binding;
pub mod config;
pub mod orchestrator;

pub use binding::{Binding, BindingTemplate, Segment};
pub use config::SessionConfig;
pub use orchestrator::{PassCounts, Session};
