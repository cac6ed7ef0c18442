//! Per-node computed style: property name to `{value, specificity}`.

use std::collections::BTreeMap;

use crate::css::specificity::Specificity;

/// A resolved style value and the specificity of the rule that set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub value: String,
    pub specificity: Specificity,
}

/// The cascade output for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    entries: BTreeMap<String, StyleEntry>,
}

impl ComputedStyle {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `property`, if set.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(|e| e.value.as_str())
    }

    /// The full entry for `property`, if set.
    pub fn entry(&self, property: &str) -> Option<&StyleEntry> {
        self.entries.get(property)
    }

    /// Whether `property` has any value.
    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    /// Cascade write: overwrite when unset or when the existing entry's
    /// specificity is lower than or equal to `specificity`.
    ///
    /// Returns `true` if the value was written.
    pub fn apply(
        &mut self,
        property: &str,
        value: impl Into<String>,
        specificity: Specificity,
    ) -> bool {
        match self.entries.get_mut(property) {
            Some(existing) if existing.specificity > specificity => false,
            Some(existing) => {
                existing.value = value.into();
                existing.specificity = specificity;
                true
            }
            None => {
                self.entries.insert(
                    property.to_owned(),
                    StyleEntry {
                        value: value.into(),
                        specificity,
                    },
                );
                true
            }
        }
    }

    /// Insert `value` at zero specificity only when `property` is unset.
    pub fn set_default(&mut self, property: &str, value: &str) {
        if !self.entries.contains_key(property) {
            self.entries.insert(
                property.to_owned(),
                StyleEntry {
                    value: value.to_owned(),
                    specificity: Specificity::ZERO,
                },
            );
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of set properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(property, entry)` pairs in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
