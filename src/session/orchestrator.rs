//! The session: one DOM, one data store, and the pipeline between them.
//!
//! Every `{path}` binding gets a subscriber. Building the session projects
//! each binding once inside that subscriber's tracking scope; afterwards a
//! write to any path a binding read re-projects it, restyles the tree and
//! lays it out again. A viewport change only relays out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::clipboard::ClipboardSource;
use crate::css::{parse_stylesheet, StyleResolver, StyleRule};
use crate::dom::{Dom, NodeId};
use crate::error::{Error, Result};
use crate::geometry::{LayoutBox, Size};
use crate::layout::LayoutEngine;
use crate::reactive::{ReactiveStore, SubscriberId, Tracked, TrackedView};
use crate::session::binding::{Binding, BindingTemplate};
use crate::session::config::SessionConfig;
use crate::template::TemplateNode;
use crate::value::Value;
use crate::widget::Tag;
use crate::widgets::RadioGroups;

/// How many style and layout passes a session has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassCounts {
    pub style: u64,
    pub layout: u64,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// State shared between the session and its binding subscribers.
struct Pipeline {
    dom: Dom,
    root: NodeId,
    resolver: StyleResolver,
    engine: LayoutEngine,
    radios: RadioGroups,
    data: TrackedView,
    passes: PassCounts,
}

impl Pipeline {
    /// Evaluate one binding into its node's prop.
    fn project(&mut self, binding: &Binding) {
        let value = binding.template.project(&self.data);
        let Some(node) = self.dom.get_mut(binding.node) else {
            return;
        };
        if node.tag == Tag::Radio && binding.two_way_path().is_some() {
            let checked = node
                .prop("option")
                .is_some_and(|option| option.to_string() == value.to_string());
            node.set_prop("checked", checked);
        }
        tracing::trace!(node = ?binding.node, prop = %binding.prop, %value, "projected binding");
        node.set_prop(binding.prop.clone(), value);
    }

    fn restyle(&mut self) {
        self.resolver.resolve(&mut self.dom, self.root);
        self.passes.style += 1;
    }

    fn relayout(&mut self) -> Result<()> {
        self.engine.layout(&mut self.dom, self.root)?;
        self.passes.layout += 1;
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.restyle();
        self.relayout()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A live UI tree bound to reactive data.
pub struct Session {
    store: ReactiveStore,
    data: TrackedView,
    pipeline: Rc<RefCell<Pipeline>>,
    bindings: Vec<(Binding, SubscriberId)>,
    writes: Rc<Cell<u64>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("bindings", &self.bindings.len())
            .field("writes", &self.writes.get())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session from a template, stylesheet text and initial data.
    pub fn new(
        template: &TemplateNode,
        stylesheet: &str,
        data: Value,
        config: SessionConfig,
    ) -> Result<Self> {
        let rules = parse_stylesheet(stylesheet)?;
        Self::with_rules(template, rules, data, config)
    }

    /// Build a session from already-parsed rules.
    pub fn with_rules(
        template: &TemplateNode,
        rules: Vec<StyleRule>,
        data: Value,
        config: SessionConfig,
    ) -> Result<Self> {
        let _span = tracing::debug_span!("session").entered();

        let (mut dom, root) = Dom::build(template)?;
        let store = ReactiveStore::new().with_max_depth(config.max_notify_depth);
        let data = store.wrap(data)?;
        let writes = Rc::new(Cell::new(0));
        let counter = writes.clone();
        store.observe_writes(move |_, field| {
            counter.set(counter.get() + 1);
            tracing::trace!(field, "data write");
        });

        let bindings = collect_bindings(&dom, root);
        let mut radios = RadioGroups::new();
        for binding in &bindings {
            let Some(path) = binding.two_way_path() else { continue };
            if let Some(node) = dom.get_mut(binding.node) {
                node.bind = Some(path.to_owned());
                if node.tag == Tag::Radio {
                    radios.register(path, binding.node);
                }
            }
        }

        let engine = LayoutEngine::new(config.viewport)
            .with_font_size(config.font_size)
            .with_assets(config.assets);
        let pipeline = Rc::new(RefCell::new(Pipeline {
            dom,
            root,
            resolver: StyleResolver::new(rules),
            engine,
            radios,
            data: data.clone(),
            passes: PassCounts::default(),
        }));

        let mut registered = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let id = store.subscribe(rerun(Rc::downgrade(&pipeline), binding.clone()));
            store.with_tracking(id, || pipeline.borrow_mut().project(&binding));
            registered.push((binding, id));
        }
        pipeline.borrow_mut().refresh()?;

        tracing::debug!(bindings = registered.len(), "session ready");
        Ok(Self {
            store,
            data,
            pipeline,
            bindings: registered,
            writes,
        })
    }

    // -- data ---------------------------------------------------------------

    /// The reactive store backing this session.
    pub fn store(&self) -> &ReactiveStore {
        &self.store
    }

    /// The root data view.
    pub fn data(&self) -> &TrackedView {
        &self.data
    }

    /// Read a dotted path without tracking; missing paths read as null.
    pub fn get(&self, path: &str) -> Value {
        self.store.untracked(|| {
            self.data
                .read_path(path)
                .map(Tracked::into_value)
                .unwrap_or_default()
        })
    }

    /// Write a dotted path, re-running every binding that read it.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.data.write_path(path, value)
    }

    /// Bindings and their subscribers, in document order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Binding, SubscriberId)> {
        self.bindings.iter().map(|(binding, id)| (binding, *id))
    }

    // -- pipeline -----------------------------------------------------------

    /// Change the viewport and lay out again. Styles are not recomputed.
    pub fn resize(&self, width: f32, height: f32) -> Result<()> {
        let mut pipeline = self.pipeline.try_borrow_mut().map_err(|_| Error::PipelineBusy)?;
        pipeline.engine.set_viewport(Size::new(width, height));
        pipeline.relayout()
    }

    /// Replace the stylesheet, then restyle and lay out.
    pub fn set_stylesheet(&self, stylesheet: &str) -> Result<()> {
        let rules = parse_stylesheet(stylesheet)?;
        let mut pipeline = self.pipeline.try_borrow_mut().map_err(|_| Error::PipelineBusy)?;
        pipeline.resolver = StyleResolver::new(rules);
        pipeline.refresh()
    }

    /// Current viewport.
    pub fn viewport(&self) -> Size {
        self.pipeline.borrow().engine.viewport()
    }

    /// Style and layout pass counters.
    pub fn passes(&self) -> PassCounts {
        self.pipeline.borrow().passes
    }

    /// Field writes seen by the store since the session was built, whether
    /// or not any binding read them.
    pub fn writes(&self) -> u64 {
        self.writes.get()
    }

    // -- tree access --------------------------------------------------------

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.pipeline.borrow().root
    }

    /// Run `f` against the DOM. Writes made inside `f` cannot re-run the
    /// pipeline and fail with [`Error::PipelineBusy`].
    pub fn with_dom<R>(&self, f: impl FnOnce(&Dom) -> R) -> Result<R> {
        let pipeline = self.pipeline.try_borrow().map_err(|_| Error::PipelineBusy)?;
        Ok(f(&pipeline.dom))
    }

    /// First node with the given `id` prop.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.with_dom(|dom| dom.query_by_id(id)).ok().flatten()
    }

    /// The laid-out box of `node`.
    pub fn layout_of(&self, node: NodeId) -> Option<LayoutBox> {
        self.with_dom(|dom| dom.get(node).map(|data| data.layout))
            .ok()
            .flatten()
    }

    /// A prop of `node`, as currently projected.
    pub fn prop(&self, node: NodeId, name: &str) -> Option<Value> {
        self.with_dom(|dom| dom.get(node).and_then(|data| data.prop(name).cloned()))
            .ok()
            .flatten()
    }

    /// Text dump of the laid-out tree.
    pub fn dump(&self) -> Result<String> {
        let root = self.root();
        self.with_dom(|dom| crate::testing::layout_to_string(dom, root))
    }

    // -- interactions -------------------------------------------------------

    /// Check a radio: uncheck its group, then write its `option` to the
    /// group's path. Returns `false` when `node` is in no group.
    pub fn check_radio(&self, node: NodeId) -> Result<bool> {
        let selected = {
            let mut guard = self.pipeline.try_borrow_mut().map_err(|_| Error::PipelineBusy)?;
            let pipeline = &mut *guard;
            pipeline.radios.select(&mut pipeline.dom, node)
        };
        match selected {
            Some((path, option)) => {
                tracing::debug!(?node, %path, "radio checked");
                self.data.write_path(&path, option)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write `value` to the path bound to `node`'s `value` prop. Returns
    /// `false` when the node has no two-way binding.
    pub fn set_value(&self, node: NodeId, value: impl Into<Value>) -> Result<bool> {
        match self.bound_path(node)? {
            Some(path) => {
                self.data.write_path(&path, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append clipboard text to the value bound to `node`. Returns `false`
    /// when the node has no two-way binding.
    pub async fn paste(&self, node: NodeId, source: &impl ClipboardSource) -> Result<bool> {
        let Some(path) = self.bound_path(node)? else {
            return Ok(false);
        };
        let pasted = source.read_text().await.map_err(|_| Error::ClipboardClosed)?;
        let current = self.get(&path);
        tracing::debug!(?node, %path, len = pasted.len(), "paste");
        self.data.write_path(&path, format!("{current}{pasted}"))?;
        Ok(true)
    }

    fn bound_path(&self, node: NodeId) -> Result<Option<String>> {
        self.with_dom(|dom| dom.get(node).and_then(|data| data.bind.clone()))
    }
}

/// Subscriber body for one binding: re-project, restyle, relayout.
fn rerun(
    pipeline: std::rc::Weak<RefCell<Pipeline>>,
    binding: Binding,
) -> impl FnMut() -> Result<()> + 'static {
    move || {
        let Some(shared) = pipeline.upgrade() else {
            return Ok(());
        };
        let mut pipeline = shared.try_borrow_mut().map_err(|_| Error::PipelineBusy)?;
        pipeline.project(&binding);
        pipeline.refresh()
    }
}

/// Every prop whose text holds a `{path}` placeholder, in document order.
fn collect_bindings(dom: &Dom, root: NodeId) -> Vec<Binding> {
    let mut bindings = Vec::new();
    for node in dom.walk_depth_first(root) {
        let Some(data) = dom.get(node) else { continue };
        for (prop, value) in &data.props {
            let Some(text) = value.as_str() else { continue };
            if let Some(template) = BindingTemplate::parse(text) {
                bindings.push(Binding {
                    node,
                    prop: prop.clone(),
                    template,
                });
            }
        }
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClosedClipboard, MemoryClipboard};
    use crate::template::TemplateNode as T;
    use pretty_assertions::assert_eq;

    fn greeting() -> Session {
        let template = T::new("div")
            .with_id("root")
            .with_prop("class", "{theme}")
            .with_child(T::new("text").with_id("title").with_prop("content", "{title}"))
            .with_child(T::new("text").with_id("who").with_prop("content", "by {user.name}"));
        let css = "
            #root { align-items: flex-start; }
            #title { font-size: 20px; }
            .dark #title { font-size: 40px; }
        ";
        let data = Value::map()
            .with("title", "hi")
            .with("theme", "light")
            .with("unrelated", 0)
            .with("user", Value::map().with("name", "ada"));
        Session::new(&template, css, data, SessionConfig::new().with_viewport(400.0, 300.0)).unwrap()
    }

    fn width_of(session: &Session, id: &str) -> f32 {
        session.layout_of(session.find_by_id(id).unwrap()).unwrap().width
    }

    #[test]
    fn initial_projection_and_layout() {
        let s = greeting();
        let title = s.find_by_id("title").unwrap();
        assert_eq!(s.prop(title, "content"), Some(Value::from("hi")));
        // "hi" at 20px: 2 * 10
        assert_eq!(width_of(&s, "title"), 20.0);
        assert_eq!(s.passes(), PassCounts { style: 1, layout: 1 });
        assert_eq!(s.bindings().count(), 3);
    }

    #[test]
    fn write_reprojects_and_relayouts() {
        let s = greeting();
        s.set("title", "hello").unwrap();
        assert_eq!(width_of(&s, "title"), 50.0);
        assert_eq!(s.passes(), PassCounts { style: 2, layout: 2 });
    }

    #[test]
    fn unchanged_write_still_reruns() {
        let s = greeting();
        s.set("title", "hi").unwrap();
        assert_eq!(s.passes(), PassCounts { style: 2, layout: 2 });
    }

    #[test]
    fn unrelated_write_does_nothing() {
        let s = greeting();
        s.set("unrelated", 5).unwrap();
        assert_eq!(s.passes(), PassCounts { style: 1, layout: 1 });
        assert_eq!(s.writes(), 1);
    }

    #[test]
    fn writes_are_counted_per_field() {
        let s = greeting();
        assert_eq!(s.writes(), 0);
        s.set("title", "a").unwrap();
        s.set("user.name", "b").unwrap();
        s.set("user", Value::map().with("name", "c")).unwrap();
        assert_eq!(s.writes(), 3);
    }

    #[test]
    fn map_bound_prop_follows_nested_writes() {
        let template = T::new("div").with_child(T::new("text").with_id("card").with_prop("content", "{user}"));
        let data = Value::map().with("user", Value::map().with("name", "ada"));
        let s = Session::new(&template, "", data, SessionConfig::new()).unwrap();
        let card = s.find_by_id("card").unwrap();
        let before = s.prop(card, "content");

        s.set("user.name", "bob").unwrap();
        let after = s.prop(card, "content");
        assert_ne!(after, before);
        assert_eq!(after, Some(Value::map().with("name", "bob")));
        assert_eq!(s.passes(), PassCounts { style: 2, layout: 2 });

        s.set("user.age", 7).unwrap();
        assert_eq!(s.prop(card, "content"), Some(Value::map().with("name", "bob").with("age", 7)));
    }

    #[test]
    fn failing_binding_does_not_leave_siblings_stale() {
        let template = T::new("div")
            .with_child(T::new("image").with_id("pic").with_prop("path", "{pic}"))
            .with_child(T::new("text").with_id("caption").with_prop("content", "{pic}"));
        let config = SessionConfig::new().with_asset("a.png", Size::new(10.0, 10.0));
        let s = Session::new(&template, "", Value::map().with("pic", "a.png"), config).unwrap();

        assert!(s.set("pic", "missing.png").is_err());
        let caption = s.find_by_id("caption").unwrap();
        assert_eq!(s.prop(caption, "content"), Some(Value::from("missing.png")));
    }

    #[test]
    fn nested_path_binding() {
        let s = greeting();
        let who = s.find_by_id("who").unwrap();
        assert_eq!(s.prop(who, "content"), Some(Value::from("by ada")));
        s.set("user.name", "grace").unwrap();
        assert_eq!(s.prop(who, "content"), Some(Value::from("by grace")));
        s.set("user", Value::map().with("name", "linus")).unwrap();
        assert_eq!(s.prop(who, "content"), Some(Value::from("by linus")));
    }

    #[test]
    fn class_binding_restyles() {
        let s = greeting();
        s.set("theme", "dark").unwrap();
        let title = s.layout_of(s.find_by_id("title").unwrap()).unwrap();
        assert_eq!((title.width, title.height), (40.0, 40.0));
    }

    #[test]
    fn resize_relayouts_without_restyle() {
        let s = greeting();
        s.resize(200.0, 100.0).unwrap();
        assert_eq!(s.passes(), PassCounts { style: 1, layout: 2 });
        assert_eq!(s.viewport(), Size::new(200.0, 100.0));
        assert_eq!(s.layout_of(s.root()).unwrap().width, 200.0);
    }

    #[test]
    fn stylesheet_swap_restyles() {
        let s = greeting();
        s.set_stylesheet("#title { font-size: 10px; }").unwrap();
        assert_eq!(width_of(&s, "title"), 10.0);
        assert!(matches!(s.set_stylesheet("#x { color"), Err(Error::Parse(_))));
    }

    #[test]
    fn writes_inside_with_dom_are_busy() {
        let s = greeting();
        let inner = s.with_dom(|_| s.set("title", "x")).unwrap();
        assert!(matches!(inner, Err(Error::PipelineBusy)));
    }

    #[test]
    fn construction_errors_are_typed() {
        let bad_tag = T::new("div").with_child(T::new("blink"));
        let err = Session::new(&bad_tag, "", Value::map(), SessionConfig::new()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));

        let err = Session::new(&T::new("div"), "", Value::from(1), SessionConfig::new()).unwrap_err();
        assert!(matches!(err, Error::Reactive(_)));

        let image = T::new("div").with_child(T::new("image").with_prop("path", "a.png"));
        let err = Session::new(&image, "", Value::map(), SessionConfig::new()).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));

        let ok = Session::new(
            &image,
            "",
            Value::map(),
            SessionConfig::new().with_asset("a.png", Size::new(10.0, 10.0)),
        );
        assert!(ok.is_ok());
    }

    fn radios() -> Session {
        let template = T::new("div")
            .with_child(T::new("radio").with_id("a").with_prop("value", "{choice}").with_prop("option", "a"))
            .with_child(T::new("radio").with_id("b").with_prop("value", "{choice}").with_prop("option", "b"))
            .with_child(T::new("input").with_id("name").with_prop("value", "{name}"))
            .with_child(T::new("text").with_id("plain").with_prop("content", "static"));
        let data = Value::map().with("choice", "a").with("name", "ab");
        Session::new(&template, "", data, SessionConfig::new()).unwrap()
    }

    #[test]
    fn radio_groups_follow_data() {
        let s = radios();
        let (a, b) = (s.find_by_id("a").unwrap(), s.find_by_id("b").unwrap());
        assert_eq!(s.prop(a, "checked"), Some(Value::Bool(true)));
        assert_eq!(s.prop(b, "checked"), Some(Value::Bool(false)));

        assert!(s.check_radio(b).unwrap());
        assert_eq!(s.get("choice"), Value::from("b"));
        assert_eq!(s.prop(a, "checked"), Some(Value::Bool(false)));
        assert_eq!(s.prop(b, "checked"), Some(Value::Bool(true)));

        s.set("choice", "a").unwrap();
        assert_eq!(s.prop(a, "checked"), Some(Value::Bool(true)));

        let plain = s.find_by_id("plain").unwrap();
        assert!(!s.check_radio(plain).unwrap());
    }

    #[test]
    fn set_value_writes_bound_path() {
        let s = radios();
        let name = s.find_by_id("name").unwrap();
        assert!(s.set_value(name, "zed").unwrap());
        assert_eq!(s.get("name"), Value::from("zed"));
        assert_eq!(s.prop(name, "value"), Some(Value::from("zed")));
        let plain = s.find_by_id("plain").unwrap();
        assert!(!s.set_value(plain, "x").unwrap());
    }

    #[test]
    fn paste_appends_to_bound_value() {
        let s = radios();
        let name = s.find_by_id("name").unwrap();
        let clip = MemoryClipboard::new("cd");
        assert!(tokio_test::block_on(s.paste(name, &clip)).unwrap());
        assert_eq!(s.get("name"), Value::from("abcd"));

        let plain = s.find_by_id("plain").unwrap();
        assert!(!tokio_test::block_on(s.paste(plain, &clip)).unwrap());

        let err = tokio_test::block_on(s.paste(name, &ClosedClipboard)).unwrap_err();
        assert!(matches!(err, Error::ClipboardClosed));
    }
}
