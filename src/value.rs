//! Plain hierarchical data: node props and reactive view-model contents.
//!
//! [`Value`] is the untyped currency passed between templates, the reactive
//! store, and node properties. Maps are ordered (`BTreeMap`) so dumps and
//! snapshots are deterministic.

use std::collections::BTreeMap;
use std::fmt;

/// A dynamically-typed data value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Sequence values are stored as-is and never made reactive.
    List(Vec<Value>),
    /// Keyed mapping; nested maps become tracked objects in the reactive store.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build an empty map value.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Builder: insert `key` into a map value. No-op on non-map values.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Map(entries) = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    /// Whether this value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value is a keyed mapping.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Borrow the text of a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: numbers directly, text parsed as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Truthiness used for `checked`-style props.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty() && s != "false",
            Value::List(items) => !items.is_empty(),
            Value::Map(_) => true,
        }
    }

    /// Look up a key on a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(_) => f.write_str("[object]"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_integers_without_fraction() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn display_lists_and_scalars() {
        let list = Value::List(vec![Value::from(1), Value::from("a"), Value::from(true)]);
        assert_eq!(list.to_string(), "1,a,true");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::map().to_string(), "[object]");
    }

    #[test]
    fn map_builder_and_lookup() {
        let v = Value::map().with("name", "ada").with("age", 36);
        assert!(v.is_map());
        assert_eq!(v.get("name"), Some(&Value::from("ada")));
        assert_eq!(v.get("age").and_then(Value::as_f64), Some(36.0));
        assert_eq!(v.get("missing"), None);
    }

    #[test]
    fn with_on_non_map_is_noop() {
        let v = Value::from("text").with("k", 1);
        assert_eq!(v, Value::from("text"));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.truthy());
        assert!(!Value::from("").truthy());
        assert!(!Value::from("false").truthy());
        assert!(Value::from("yes").truthy());
        assert!(!Value::from(0).truthy());
        assert!(Value::from(2).truthy());
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(Value::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(Value::from("abc").as_f64(), None);
    }
}
