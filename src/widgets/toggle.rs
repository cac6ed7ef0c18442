//! Two-state and swatch controls: checkbox, radio, switch, color.
//!
//! Radios bound to the same data path form a group. Group membership lives in
//! [`RadioGroups`], a side-table owned by the session rather than by the
//! widgets themselves.

use std::collections::HashMap;

use crate::dom::{Dom, NodeData, NodeId};
use crate::geometry::Size;
use crate::value::Value;
use crate::widget::traits::{MeasureContext, MeasureError, Widget};
use crate::widgets::LABEL_FONT_SIZE;

/// Checkbox with a trailing `label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkbox;

impl Widget for Checkbox {
    fn measure(&self, node: &NodeData, ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(24.0 + ctx.prop_width(node, "label", LABEL_FONT_SIZE), 14.0))
    }
}

/// Radio button with a trailing `label`; selects `option` into its bind path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Radio;

impl Widget for Radio {
    fn measure(&self, node: &NodeData, ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(26.0 + ctx.prop_width(node, "label", LABEL_FONT_SIZE), 16.0))
    }
}

/// On/off switch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Switch;

impl Widget for Switch {
    fn measure(&self, _node: &NodeData, _ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(40.0, 20.0))
    }
}

/// Color swatch with a picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPicker;

impl Widget for ColorPicker {
    fn measure(&self, _node: &NodeData, _ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(40.0, 40.0))
    }
}

// ---------------------------------------------------------------------------
// RadioGroups
// ---------------------------------------------------------------------------

/// Radio nodes grouped by bound data path, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RadioGroups {
    groups: HashMap<String, Vec<NodeId>>,
}

impl RadioGroups {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` to the group for `path`. No-op if already a member.
    pub fn register(&mut self, path: &str, node: NodeId) {
        let members = self.groups.entry(path.to_owned()).or_default();
        if !members.contains(&node) {
            members.push(node);
        }
    }

    /// Members of the group for `path`.
    pub fn members(&self, path: &str) -> &[NodeId] {
        self.groups.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The path of the group containing `node`.
    pub fn group_of(&self, node: NodeId) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.contains(&node))
            .map(|(path, _)| path.as_str())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Check `node` and uncheck the rest of its group.
    ///
    /// Returns the group path and the node's `option` value for the caller to
    /// write back, or `None` when `node` belongs to no group.
    pub fn select(&self, dom: &mut Dom, node: NodeId) -> Option<(String, Value)> {
        let path = self.group_of(node)?.to_owned();
        for &member in self.members(&path) {
            if let Some(data) = dom.get_mut(member) {
                data.set_prop("checked", member == node);
            }
        }
        let option = dom
            .get(node)
            .and_then(|data| data.prop("option").cloned())
            .unwrap_or_default();
        Some((path, option))
    }
}
