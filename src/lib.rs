//! # gilt-canvas
//!
//! A headless component runtime: CSS-like styling, flexbox-style layout and
//! fine-grained reactive data binding over a retained DOM.
//!
//! A [`template::TemplateNode`] tree is instantiated into a [`dom::Dom`],
//! styled by a cascade over parsed rules, and laid out into absolute boxes
//! against a viewport. Props holding `{path}` placeholders are bound to a
//! reactive data tree; writing a path re-projects exactly the props that read
//! it, then restyles and lays out again.
//!
//! ## Core Systems
//!
//! - **[`css`]**: Stylesheet tokenizer, parser, specificity and cascade resolver
//! - **[`dom`]**: Slotmap-backed node arena with tree walks and selector matching
//! - **[`template`]**: Template descriptions and the tag factory
//! - **[`layout`]**: Flex lines, main/cross placement and the layout engine
//! - **[`widget`]**: Tag registry, measuring contracts, text and asset metrics
//! - **[`widgets`]**: Built-in leaf and container kinds
//! - **[`reactive`]**: Proxy-style tracked views, subscribers and write notification
//! - **[`session`]**: Bindings and the orchestrator tying the pipeline together
//! - **[`clipboard`]**: Asynchronous clipboard sources
//! - **[`testing`]**: Headless Pilot and layout dumps
//! - **[`geometry`]**: Size, LayoutBox and edge primitives
//! - **[`value`]**: Dynamic data values

// Foundation
pub mod error;
pub mod geometry;
pub mod value;

// Core systems
pub mod css;
pub mod dom;
pub mod layout;
pub mod template;

// Widget system
pub mod widget;
pub mod widgets;

// Reactivity and orchestration
pub mod clipboard;
pub mod reactive;
pub mod session;

// Testing
pub mod testing;

pub use error::{Error, Result};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use gilt_canvas_macros::view;
