//! CSS engine: tokenizer, parser, specificity, cascade.

pub mod scalar;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod style;
pub mod specificity;
pub mod resolver;

pub use model::{Declaration, Selector, SelectorPart, StyleRule};
pub use parser::{parse_stylesheet, ParseError};
pub use resolver::{resolve_styles, StyleResolver};
pub use specificity::Specificity;
pub use style::{ComputedStyle, StyleEntry};
