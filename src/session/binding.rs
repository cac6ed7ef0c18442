//! Property bindings: `{path}` placeholders in raw prop text.

use std::fmt;

use crate::dom::NodeId;
use crate::reactive::{Tracked, TrackedView};
use crate::value::Value;

/// One piece of a binding template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Dotted data path, e.g. `user.name`.
    Path(String),
}

/// Parsed prop text such as `"Hello {user.name}!"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTemplate {
    segments: Vec<Segment>,
}

impl BindingTemplate {
    /// Parse `text`. Returns `None` when it has no `{path}` placeholder.
    ///
    /// An unterminated `{` and empty `{}` are kept as literal text.
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else { break };
            let path = after[..close].trim();
            literal.push_str(&rest[..open]);
            if path.is_empty() {
                literal.push_str("{}");
            } else {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Path(path.to_owned()));
            }
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        segments
            .iter()
            .any(|s| matches!(s, Segment::Path(_)))
            .then_some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every path the template reads, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Path(path) => Some(path.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// The path when the template is exactly one placeholder.
    pub fn sole_path(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [Segment::Path(path)] => Some(path),
            _ => None,
        }
    }

    /// Evaluate against `data`, tracking every path read.
    ///
    /// A sole placeholder yields the bound value unchanged (lists and maps
    /// included); otherwise values are rendered into the surrounding text.
    /// Missing paths read as [`Value::Null`].
    pub fn project(&self, data: &TrackedView) -> Value {
        if let Some(path) = self.sole_path() {
            return read(data, path);
        }
        let text: String = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Path(path) => read(data, path).to_string(),
            })
            .collect();
        Value::Text(text)
    }
}

impl fmt::Display for BindingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Path(path) => write!(f, "{{{path}}}")?,
            }
        }
        Ok(())
    }
}

fn read(data: &TrackedView, path: &str) -> Value {
    data.read_path(path).map(Tracked::into_value).unwrap_or_default()
}

/// A prop on one node driven by a [`BindingTemplate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub node: NodeId,
    pub prop: String,
    pub template: BindingTemplate,
}

impl Binding {
    /// The two-way target path, for a sole placeholder on the `value` prop.
    pub fn two_way_path(&self) -> Option<&str> {
        if self.prop == "value" {
            self.template.sole_path()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::ReactiveStore;
    use pretty_assertions::assert_eq;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.into())
    }

    fn path(s: &str) -> Segment {
        Segment::Path(s.into())
    }

    #[test]
    fn plain_text_is_not_a_binding() {
        assert_eq!(BindingTemplate::parse("hello"), None);
        assert_eq!(BindingTemplate::parse("a {} b"), None);
        assert_eq!(BindingTemplate::parse("open { only"), None);
    }

    #[test]
    fn parses_mixed_segments() {
        let t = BindingTemplate::parse("Hi {user.name}, you have {count} items").unwrap();
        assert_eq!(
            t.segments(),
            &[lit("Hi "), path("user.name"), lit(", you have "), path("count"), lit(" items")]
        );
        assert_eq!(t.paths().collect::<Vec<_>>(), vec!["user.name", "count"]);
        assert_eq!(t.sole_path(), None);
        assert_eq!(t.to_string(), "Hi {user.name}, you have {count} items");
    }

    #[test]
    fn sole_placeholder_trims_whitespace() {
        let t = BindingTemplate::parse("{ title }").unwrap();
        assert_eq!(t.sole_path(), Some("title"));
    }

    #[test]
    fn projection() {
        let store = ReactiveStore::new();
        let data = store
            .wrap(
                Value::map()
                    .with("count", 3)
                    .with("tags", Value::List(vec!["a".into(), "b".into()]))
                    .with("user", Value::map().with("name", "ada")),
            )
            .unwrap();

        let t = BindingTemplate::parse("{user.name} has {count}").unwrap();
        assert_eq!(t.project(&data), Value::from("ada has 3"));

        let t = BindingTemplate::parse("{tags}").unwrap();
        assert_eq!(t.project(&data), Value::List(vec!["a".into(), "b".into()]));

        let t = BindingTemplate::parse("[{missing}]").unwrap();
        assert_eq!(t.project(&data), Value::from("[]"));
    }

    #[test]
    fn two_way_only_on_value_prop() {
        let node = NodeId::default();
        let template = BindingTemplate::parse("{name}").unwrap();
        let b = Binding { node, prop: "value".into(), template: template.clone() };
        assert_eq!(b.two_way_path(), Some("name"));
        let b = Binding { node, prop: "label".into(), template };
        assert_eq!(b.two_way_path(), None);
    }
}
