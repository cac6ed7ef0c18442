//! Pilot: drive a headless [`Session`] by element id.
//!
//! The `Pilot` wraps a [`Session`] and addresses nodes by their `id` prop, so
//! tests read like a sequence of user actions: type into an input, check a
//! radio, resize the viewport, then inspect boxes or a layout dump.

use crate::clipboard::ClipboardSource;
use crate::dom::NodeId;
use crate::error::Result;
use crate::geometry::LayoutBox;
use crate::session::{Session, SessionConfig};
use crate::template::TemplateNode;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless session driver for testing.
///
/// # Examples
///
/// ```ignore
/// use gilt_canvas::testing::Pilot;
/// use gilt_canvas::template::TemplateNode;
/// use gilt_canvas::value::Value;
///
/// let template = TemplateNode::new("div")
///     .with_child(TemplateNode::new("input").with_id("name").with_prop("value", "{name}"));
/// let pilot = Pilot::new(&template, "", Value::map().with("name", "")).unwrap();
/// pilot.type_text("name", "ada").unwrap();
/// assert_eq!(pilot.get("name"), Value::from("ada"));
/// ```
#[derive(Debug)]
pub struct Pilot {
    session: Session,
}

impl Pilot {
    /// Start a session with the default configuration.
    pub fn new(template: &TemplateNode, stylesheet: &str, data: Value) -> Result<Self> {
        Self::with_config(template, stylesheet, data, SessionConfig::new())
    }

    /// Start a session with an explicit configuration.
    pub fn with_config(
        template: &TemplateNode,
        stylesheet: &str,
        data: Value,
        config: SessionConfig,
    ) -> Result<Self> {
        Ok(Self {
            session: Session::new(template, stylesheet, data, config)?,
        })
    }

    /// The driven session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Node with the given `id` prop.
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.session.find_by_id(id)
    }

    // ── Data ─────────────────────────────────────────────────────────

    /// Read a data path without tracking.
    pub fn get(&self, path: &str) -> Value {
        self.session.get(path)
    }

    /// Write a data path.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.session.set(path, value)
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Replace the value of the element `id`. Returns `false` when no such
    /// element exists or it has no two-way binding.
    pub fn fill(&self, id: &str, value: impl Into<Value>) -> Result<bool> {
        match self.node(id) {
            Some(node) => self.session.set_value(node, value),
            None => Ok(false),
        }
    }

    /// Type `text` into the element `id` one character at a time. Each
    /// character is a separate write.
    pub fn type_text(&self, id: &str, text: &str) -> Result<bool> {
        let Some(node) = self.node(id) else {
            return Ok(false);
        };
        let Some(Value::Text(mut current)) = self.session.prop(node, "value") else {
            return self.session.set_value(node, text);
        };
        for ch in text.chars() {
            current.push(ch);
            if !self.session.set_value(node, current.as_str())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check the radio `id`.
    pub fn check(&self, id: &str) -> Result<bool> {
        match self.node(id) {
            Some(node) => self.session.check_radio(node),
            None => Ok(false),
        }
    }

    /// Paste from `source` into the element `id`.
    pub async fn paste(&self, id: &str, source: &impl ClipboardSource) -> Result<bool> {
        match self.node(id) {
            Some(node) => self.session.paste(node, source).await,
            None => Ok(false),
        }
    }

    /// Resize the viewport.
    pub fn resize(&self, width: f32, height: f32) -> Result<()> {
        self.session.resize(width, height)
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Laid-out box of the element `id`.
    pub fn layout(&self, id: &str) -> Option<LayoutBox> {
        self.node(id).and_then(|node| self.session.layout_of(node))
    }

    /// A prop of the element `id`, as currently projected.
    pub fn prop(&self, id: &str, name: &str) -> Option<Value> {
        self.node(id).and_then(|node| self.session.prop(node, name))
    }

    /// Text dump of the whole laid-out tree.
    pub fn dump(&self) -> Result<String> {
        self.session.dump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::template::TemplateNode as T;
    use pretty_assertions::assert_eq;

    fn form() -> Pilot {
        let template = T::new("div")
            .with_id("root")
            .with_child(T::new("text").with_id("echo").with_prop("content", "{name}"))
            .with_child(T::new("input").with_id("name").with_prop("value", "{name}"))
            .with_child(T::new("radio").with_id("s").with_prop("value", "{size}").with_prop("option", "s"))
            .with_child(T::new("radio").with_id("l").with_prop("value", "{size}").with_prop("option", "l"));
        let data = Value::map().with("name", "").with("size", "s");
        Pilot::with_config(
            &template,
            "#root { flex-direction: column; align-items: flex-start; }",
            data,
            SessionConfig::new().with_viewport(300.0, 200.0),
        )
        .unwrap()
    }

    #[test]
    fn typing_updates_data_and_bound_text() {
        let pilot = form();
        assert!(pilot.type_text("name", "ada").unwrap());
        assert_eq!(pilot.get("name"), Value::from("ada"));
        assert_eq!(pilot.prop("echo", "content"), Some(Value::from("ada")));
        // 3 chars at 16px
        assert_eq!(pilot.layout("echo").unwrap().width, 24.0);
    }

    #[test]
    fn each_keystroke_is_a_write() {
        let pilot = form();
        let before = pilot.session().passes();
        pilot.type_text("name", "abcd").unwrap();
        assert!(pilot.session().passes().layout >= before.layout + 4);
    }

    #[test]
    fn fill_and_check() {
        let pilot = form();
        assert!(pilot.fill("name", "grace").unwrap());
        assert_eq!(pilot.get("name"), Value::from("grace"));

        assert!(pilot.check("l").unwrap());
        assert_eq!(pilot.get("size"), Value::from("l"));
        assert_eq!(pilot.prop("s", "checked"), Some(Value::Bool(false)));
        assert_eq!(pilot.prop("l", "checked"), Some(Value::Bool(true)));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let pilot = form();
        assert!(!pilot.fill("nope", "x").unwrap());
        assert!(!pilot.type_text("nope", "x").unwrap());
        assert!(!pilot.check("nope").unwrap());
        assert_eq!(pilot.layout("nope"), None);
    }

    #[test]
    fn paste_through_pilot() {
        let pilot = form();
        pilot.fill("name", "ab").unwrap();
        let clip = MemoryClipboard::new("cd");
        assert!(tokio_test::block_on(pilot.paste("name", &clip)).unwrap());
        assert_eq!(pilot.get("name"), Value::from("abcd"));
    }

    #[test]
    fn resize_moves_root() {
        let pilot = form();
        pilot.resize(120.0, 90.0).unwrap();
        let root = pilot.layout("root").unwrap();
        assert_eq!((root.width, root.height), (120.0, 90.0));
        assert!(pilot.dump().unwrap().starts_with("div#root [0,0 120x90]"));
    }
}
