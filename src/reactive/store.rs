//! The reactive runtime: interned objects, cells, subscribers.
//!
//! A [`ReactiveStore`] owns every object reachable from wrapped data, keyed by
//! [`ObjectId`]. A cell is an `(ObjectId, field)` pair; reading it inside a
//! tracking scope records the active subscriber on it, and writing it replays
//! every recorded subscriber in insertion order. Writes always notify, even
//! when the value is unchanged.
//!
//! Besides per-field cells, each object has a key-set cell: reading every
//! field of an object records it, and adding a field to that object replays
//! it. Replacing a nested object releases the old one and its cells.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::error::Result;
use crate::reactive::view::TrackedView;
use crate::reactive::ReactiveError;
use crate::value::Value;

/// Default bound on nested write notifications.
pub const DEFAULT_MAX_DEPTH: usize = 64;

new_key_type! {
    /// Identity of one interned mapping inside a store.
    pub struct ObjectId;
    /// Handle to a registered subscriber callback.
    pub struct SubscriberId;
}

/// Callback replayed when a cell it read is written.
pub type Callback = Box<dyn FnMut() -> Result<()>>;

/// Callback told about every write, before subscribers run.
type WriteObserver = Box<dyn FnMut(ObjectId, &str)>;

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

/// A field's stored value. Mappings are interned as objects so each has a
/// stable identity for cell keys.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Plain(Value),
    Object(ObjectId),
}

struct SubscriberState {
    /// Taken out while the callback runs so the runtime is not borrowed
    /// across user code. `None` therefore also means "currently running".
    callback: Option<Callback>,
}

struct Runtime {
    objects: SlotMap<ObjectId, BTreeMap<String, Slot>>,
    cells: HashMap<(ObjectId, String), Vec<SubscriberId>>,
    /// Key-set cells: subscribers that read an object's whole field list.
    shapes: HashMap<ObjectId, Vec<SubscriberId>>,
    subscribers: SlotMap<SubscriberId, SubscriberState>,
    /// Effect-context stack; the top is the active subscriber.
    tracking: Vec<SubscriberId>,
    observers: Vec<WriteObserver>,
    /// Nesting of in-flight write notifications.
    depth: usize,
    max_depth: usize,
}

impl Runtime {
    fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            cells: HashMap::new(),
            shapes: HashMap::new(),
            subscribers: SlotMap::with_key(),
            tracking: Vec::new(),
            observers: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Store `value`, interning every nested mapping. Lists stay plain.
    fn intern(&mut self, value: Value) -> Slot {
        match value {
            Value::Map(map) => {
                let fields = map
                    .into_iter()
                    .map(|(key, value)| (key, self.intern(value)))
                    .collect();
                Slot::Object(self.objects.insert(fields))
            }
            other => Slot::Plain(other),
        }
    }

    /// Rebuild a plain value from a slot.
    fn materialize(&self, slot: &Slot) -> Value {
        match slot {
            Slot::Plain(value) => value.clone(),
            Slot::Object(id) => self.snapshot(*id),
        }
    }

    fn snapshot(&self, object: ObjectId) -> Value {
        let map = self
            .objects
            .get(object)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(key, slot)| (key.clone(), self.materialize(slot)))
                    .collect()
            })
            .unwrap_or_default();
        Value::Map(map)
    }

    /// Record the active subscriber on a cell, once.
    fn track(&mut self, object: ObjectId, field: &str) {
        let Some(&active) = self.tracking.last() else {
            return;
        };
        let subscribers = self.cells.entry((object, field.to_owned())).or_default();
        if !subscribers.contains(&active) {
            tracing::trace!(?object, field, subscriber = ?active, "tracked read");
            subscribers.push(active);
        }
    }

    /// Record the active subscriber on an object's key-set cell, once.
    fn track_keys(&mut self, object: ObjectId) {
        let Some(&active) = self.tracking.last() else {
            return;
        };
        let subscribers = self.shapes.entry(object).or_default();
        if !subscribers.contains(&active) {
            subscribers.push(active);
        }
    }

    /// Drop an object that is no longer reachable, with its nested objects
    /// and every cell keyed on them.
    fn release(&mut self, object: ObjectId) {
        let Some(fields) = self.objects.remove(object) else {
            return;
        };
        for slot in fields.into_values() {
            if let Slot::Object(child) = slot {
                self.release(child);
            }
        }
        self.cells.retain(|(owner, _), _| *owner != object);
        self.shapes.remove(&object);
    }
}

// ---------------------------------------------------------------------------
// ReactiveStore
// ---------------------------------------------------------------------------

/// Shared handle to one reactive runtime. Cloning shares the runtime.
#[derive(Clone)]
pub struct ReactiveStore {
    rt: Rc<RefCell<Runtime>>,
}

impl fmt::Debug for ReactiveStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rt = self.rt.borrow();
        f.debug_struct("ReactiveStore")
            .field("objects", &rt.objects.len())
            .field("cells", &rt.cells.len())
            .field("subscribers", &rt.subscribers.len())
            .field("max_depth", &rt.max_depth)
            .finish()
    }
}

impl Default for ReactiveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactiveStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rt: Rc::new(RefCell::new(Runtime::new())),
        }
    }

    /// Bound nested write notifications at `depth` (builder).
    pub fn with_max_depth(self, depth: usize) -> Self {
        self.rt.borrow_mut().max_depth = depth;
        self
    }

    /// Wrap a mapping; the returned view tracks reads and notifies on writes.
    pub fn wrap(&self, data: Value) -> Result<TrackedView, ReactiveError> {
        if !data.is_map() {
            return Err(ReactiveError::NotAnObject("<root>".into()));
        }
        let slot = self.rt.borrow_mut().intern(data);
        match slot {
            Slot::Object(object) => Ok(TrackedView::new(self.clone(), object)),
            Slot::Plain(_) => Err(ReactiveError::NotAnObject("<root>".into())),
        }
    }

    /// Register `callback` without running it. It fires for every cell it is
    /// tracked on, inside its own tracking scope.
    pub fn subscribe(&self, callback: impl FnMut() -> Result<()> + 'static) -> SubscriberId {
        self.rt.borrow_mut().subscribers.insert(SubscriberState {
            callback: Some(Box::new(callback)),
        })
    }

    /// Register `callback` and run it once tracked, like an effect.
    pub fn effect(&self, callback: impl FnMut() -> Result<()> + 'static) -> Result<SubscriberId> {
        let id = self.subscribe(callback);
        self.run(id)?;
        Ok(id)
    }

    /// Drop a subscriber and remove it from every cell.
    pub fn unsubscribe(&self, id: SubscriberId) -> Result<(), ReactiveError> {
        let mut guard = self.rt.borrow_mut();
        let rt = &mut *guard;
        if rt.subscribers.remove(id).is_none() {
            return Err(ReactiveError::UnknownSubscriber(id));
        }
        for subscribers in rt.cells.values_mut().chain(rt.shapes.values_mut()) {
            subscribers.retain(|s| *s != id);
        }
        Ok(())
    }

    /// Run `f` with `subscriber` as the active subscriber; every cell read in
    /// `f` records it.
    pub fn with_tracking<R>(&self, subscriber: SubscriberId, f: impl FnOnce() -> R) -> R {
        self.rt.borrow_mut().tracking.push(subscriber);
        let result = f();
        self.rt.borrow_mut().tracking.pop();
        result
    }

    /// Run `f` with no active subscriber, so its reads are not recorded.
    pub fn untracked<R>(&self, f: impl FnOnce() -> R) -> R {
        let saved = std::mem::take(&mut self.rt.borrow_mut().tracking);
        let result = f();
        self.rt.borrow_mut().tracking = saved;
        result
    }

    /// Call `observer` after every write, before subscribers are replayed.
    pub fn observe_writes(&self, observer: impl FnMut(ObjectId, &str) + 'static) {
        self.rt.borrow_mut().observers.push(Box::new(observer));
    }

    /// Subscribers recorded on a cell, in insertion order.
    pub fn subscribers_of(&self, object: ObjectId, field: &str) -> Vec<SubscriberId> {
        self.rt
            .borrow()
            .cells
            .get(&(object, field.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of cells with at least one recorded read.
    pub fn cell_count(&self) -> usize {
        self.rt.borrow().cells.len()
    }

    /// Number of live interned objects.
    pub fn object_count(&self) -> usize {
        self.rt.borrow().objects.len()
    }

    // -- crate-internal access used by TrackedView --------------------------

    pub(crate) fn read(&self, object: ObjectId, field: &str) -> Option<Slot> {
        let mut rt = self.rt.borrow_mut();
        rt.track(object, field);
        rt.objects.get(object)?.get(field).cloned()
    }

    pub(crate) fn peek(&self, object: ObjectId, field: &str) -> Option<Slot> {
        self.rt.borrow().objects.get(object)?.get(field).cloned()
    }

    /// Field names of an object, recorded on its key-set cell.
    pub(crate) fn read_keys(&self, object: ObjectId) -> Vec<String> {
        self.rt.borrow_mut().track_keys(object);
        self.keys(object)
    }

    pub(crate) fn keys(&self, object: ObjectId) -> Vec<String> {
        self.rt
            .borrow()
            .objects
            .get(object)
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn materialize(&self, slot: &Slot) -> Value {
        self.rt.borrow().materialize(slot)
    }

    pub(crate) fn snapshot(&self, object: ObjectId) -> Value {
        self.rt.borrow().snapshot(object)
    }

    /// Assign a field, then notify observers and the cell's subscribers.
    /// Adding a new field also notifies the object's key-set readers.
    pub(crate) fn write(&self, object: ObjectId, field: &str, value: Value) -> Result<()> {
        let subscribers = {
            let mut rt = self.rt.borrow_mut();
            if !rt.objects.contains_key(object) {
                return Err(ReactiveError::NotAnObject(field.to_owned()).into());
            }
            let slot = rt.intern(value);
            let previous = rt
                .objects
                .get_mut(object)
                .and_then(|fields| fields.insert(field.to_owned(), slot));
            let mut subscribers = rt
                .cells
                .get(&(object, field.to_owned()))
                .cloned()
                .unwrap_or_default();
            match previous {
                Some(Slot::Object(old)) => rt.release(old),
                Some(Slot::Plain(_)) => {}
                None => {
                    for &id in rt.shapes.get(&object).into_iter().flatten() {
                        if !subscribers.contains(&id) {
                            subscribers.push(id);
                        }
                    }
                }
            }
            subscribers
        };
        tracing::debug!(?object, field, subscribers = subscribers.len(), "write");

        self.notify_observers(object, field);
        self.notify(field, subscribers)
    }

    fn notify_observers(&self, object: ObjectId, field: &str) {
        let mut observers = std::mem::take(&mut self.rt.borrow_mut().observers);
        for observer in observers.iter_mut() {
            observer(object, field);
        }
        let mut rt = self.rt.borrow_mut();
        observers.append(&mut rt.observers);
        rt.observers = observers;
    }

    fn notify(&self, field: &str, subscribers: Vec<SubscriberId>) -> Result<()> {
        let depth = {
            let mut rt = self.rt.borrow_mut();
            rt.depth += 1;
            rt.depth
        };
        let result = self.replay(field, depth, &subscribers);
        self.rt.borrow_mut().depth -= 1;
        result
    }

    fn replay(&self, field: &str, depth: usize, subscribers: &[SubscriberId]) -> Result<()> {
        let max_depth = self.rt.borrow().max_depth;
        if depth > max_depth {
            tracing::error!(field, depth, "write notifications nested too deeply");
            return Err(ReactiveError::WriteCycle { field: field.to_owned(), depth }.into());
        }
        // Every subscriber runs even after one fails; the first error wins.
        let mut first_error = None;
        for &id in subscribers {
            let outcome = if self.is_running(id) {
                tracing::error!(field, depth, subscriber = ?id, "subscriber re-entered by its own write");
                Err(ReactiveError::WriteCycle { field: field.to_owned(), depth }.into())
            } else {
                self.run(id)
            };
            if let Err(err) = outcome {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn is_running(&self, id: SubscriberId) -> bool {
        self.rt
            .borrow()
            .subscribers
            .get(id)
            .is_some_and(|s| s.callback.is_none())
    }

    /// Run one subscriber inside its own tracking scope.
    fn run(&self, id: SubscriberId) -> Result<()> {
        let callback = {
            let mut rt = self.rt.borrow_mut();
            match rt.subscribers.get_mut(id) {
                Some(state) => state.callback.take(),
                // Unsubscribed since the notification list was taken.
                None => return Ok(()),
            }
        };
        let Some(mut callback) = callback else {
            return Ok(());
        };

        let result = self.with_tracking(id, &mut callback);

        if let Some(state) = self.rt.borrow_mut().subscribers.get_mut(id) {
            state.callback = Some(callback);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    fn data() -> Value {
        Value::map()
            .with("count", 1)
            .with("user", Value::map().with("name", "ada"))
            .with("tags", Value::List(vec!["a".into(), "b".into()]))
    }

    #[test]
    fn wrap_rejects_non_maps() {
        let store = ReactiveStore::new();
        assert!(matches!(store.wrap(Value::from(3)), Err(ReactiveError::NotAnObject(_))));
        assert!(store.wrap(data()).is_ok());
    }

    #[test]
    fn effect_runs_once_immediately() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let v = view.clone();
        store
            .effect(move || {
                r.set(r.get() + 1);
                let _ = v.get_value("count");
                Ok(())
            })
            .unwrap();
        assert_eq!(runs.get(), 1);
        assert_eq!(store.cell_count(), 1);
    }

    #[test]
    fn write_notifies_even_when_unchanged() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let v = view.clone();
        store
            .effect(move || {
                r.set(r.get() + 1);
                let _ = v.get_value("count");
                Ok(())
            })
            .unwrap();

        view.set("count", 1).unwrap();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn subscribers_fire_in_registration_order() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let log = log.clone();
            let v = view.clone();
            store
                .effect(move || {
                    let _ = v.get_value("count");
                    log.borrow_mut().push(name);
                    Ok(())
                })
                .unwrap();
        }
        log.borrow_mut().clear();

        view.set("count", 2).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn untracked_fields_do_not_notify() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let v = view.clone();
        store
            .effect(move || {
                r.set(r.get() + 1);
                let _ = v.get_value("count");
                Ok(())
            })
            .unwrap();

        view.set("tags", Value::List(vec![])).unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn with_tracking_records_without_running() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let id = store.subscribe(move || {
            r.set(r.get() + 1);
            Ok(())
        });

        store.with_tracking(id, || view.get_value("count"));
        assert_eq!(runs.get(), 0);
        assert_eq!(store.subscribers_of(view.id(), "count"), vec![id]);

        view.set("count", 5).unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn untracked_reads_are_not_recorded() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let id = store.subscribe(|| Ok(()));
        store.with_tracking(id, || store.untracked(|| view.get_value("count")));
        assert!(store.subscribers_of(view.id(), "count").is_empty());
    }

    #[test]
    fn repeated_reads_register_once() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let id = store.subscribe(|| Ok(()));
        store.with_tracking(id, || {
            view.get_value("count");
            view.get_value("count");
        });
        assert_eq!(store.subscribers_of(view.id(), "count").len(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let v = view.clone();
        let id = store
            .effect(move || {
                r.set(r.get() + 1);
                let _ = v.get_value("count");
                Ok(())
            })
            .unwrap();

        store.unsubscribe(id).unwrap();
        view.set("count", 3).unwrap();
        assert_eq!(runs.get(), 1);
        assert!(matches!(store.unsubscribe(id), Err(ReactiveError::UnknownSubscriber(_))));
    }

    #[test]
    fn self_write_is_reported_as_cycle() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let v = view.clone();
        let armed = Rc::new(Cell::new(false));
        let a = armed.clone();
        store
            .effect(move || {
                let n = v.get_value("count").as_f64().unwrap_or(0.0);
                if a.get() {
                    v.set("count", n + 1.0)?;
                }
                Ok(())
            })
            .unwrap();

        armed.set(true);
        let err = view.set("count", 10).unwrap_err();
        assert!(matches!(
            err,
            Error::Reactive(ReactiveError::WriteCycle { ref field, .. }) if field == "count"
        ));
    }

    #[test]
    fn ping_pong_between_subscribers_is_cut() {
        let store = ReactiveStore::new();
        let view = store.wrap(Value::map().with("a", 0).with("b", 0)).unwrap();

        let v = view.clone();
        store
            .subscribe(move || {
                let a = v.get_value("a").as_f64().unwrap_or(0.0);
                v.set("b", a + 1.0)
            });
        let v = view.clone();
        store
            .subscribe(move || {
                let b = v.get_value("b").as_f64().unwrap_or(0.0);
                v.set("a", b + 1.0)
            });
        // Register both on their input cells.
        let subs: Vec<_> = {
            let rt = store.rt.borrow();
            rt.subscribers.keys().collect()
        };
        store.with_tracking(subs[0], || view.get_value("a"));
        store.with_tracking(subs[1], || view.get_value("b"));

        let err = view.set("a", 1).unwrap_err();
        assert!(matches!(err, Error::Reactive(ReactiveError::WriteCycle { .. })));
    }

    #[test]
    fn deep_chains_hit_max_depth() {
        let store = ReactiveStore::new().with_max_depth(3);
        let fields = ["f0", "f1", "f2", "f3", "f4"];
        let mut data = Value::map();
        for f in fields {
            data = data.with(f, 0);
        }
        let view = store.wrap(data).unwrap();

        // f0 -> f1 -> f2 -> f3 -> f4, each hop one subscriber deeper.
        for pair in fields.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let v = view.clone();
            let id = store.subscribe(move || v.set(to, 1));
            store.with_tracking(id, || view.get_value(from));
        }

        let err = view.set("f0", 1).unwrap_err();
        assert!(matches!(err, Error::Reactive(ReactiveError::WriteCycle { depth: 4, .. })));
        // The runtime unwinds fully after a cut.
        assert_eq!(store.rt.borrow().depth, 0);
    }

    #[test]
    fn observers_see_every_write() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        store.observe_writes(move |_, field| s.borrow_mut().push(field.to_owned()));

        view.set("count", 2).unwrap();
        view.set("tags", Value::Null).unwrap();
        assert_eq!(*seen.borrow(), vec!["count".to_string(), "tags".to_string()]);
    }

    #[test]
    fn subscriber_errors_propagate_to_writer() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let v = view.clone();
        let armed = Rc::new(Cell::new(false));
        let a = armed.clone();
        store
            .effect(move || {
                let _ = v.get_value("count");
                if a.get() {
                    return Err(Error::PipelineBusy);
                }
                Ok(())
            })
            .unwrap();
        armed.set(true);
        assert!(matches!(view.set("count", 3), Err(Error::PipelineBusy)));
    }

    #[test]
    fn failing_subscriber_does_not_starve_later_ones() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        let armed = Rc::new(Cell::new(false));

        for (name, fails) in [("first", true), ("second", false), ("third", true)] {
            let (v, log, armed) = (view.clone(), log.clone(), armed.clone());
            store
                .effect(move || {
                    let _ = v.get_value("count");
                    log.borrow_mut().push(name);
                    if fails && armed.get() {
                        return Err(if name == "first" {
                            Error::PipelineBusy
                        } else {
                            Error::ClipboardClosed
                        });
                    }
                    Ok(())
                })
                .unwrap();
        }
        log.borrow_mut().clear();
        armed.set(true);

        assert!(matches!(view.set("count", 3), Err(Error::PipelineBusy)));
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn replacing_objects_releases_the_old_ones() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let v = view.clone();
        store
            .effect(move || {
                let _ = v.read_path("user.name");
                Ok(())
            })
            .unwrap();
        let objects = store.object_count();
        let cells = store.cell_count();

        for name in ["a", "b", "c", "d"] {
            view.set("user", Value::map().with("name", name).with("prefs", Value::map()))
                .unwrap();
        }
        // One extra object for the nested `prefs` map.
        assert_eq!(store.object_count(), objects + 1);
        assert_eq!(store.cell_count(), cells);
    }

    #[test]
    fn writes_to_a_released_object_fail() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let old = view.get("user").and_then(|t| t.as_object().cloned()).unwrap();
        view.set("user", Value::map()).unwrap();
        assert!(matches!(
            old.set("name", "x"),
            Err(Error::Reactive(ReactiveError::NotAnObject(_)))
        ));
    }

    #[test]
    fn adding_a_field_notifies_key_set_readers() {
        let store = ReactiveStore::new();
        let view = store.wrap(data()).unwrap();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let v = view.clone();
        store
            .effect(move || {
                r.set(r.get() + 1);
                let _ = v.get_value("user");
                Ok(())
            })
            .unwrap();

        view.write_path("user.age", 36).unwrap();
        assert_eq!(runs.get(), 2);
        // Rewriting an existing sibling that was read also notifies.
        view.write_path("user.age", 37).unwrap();
        assert_eq!(runs.get(), 3);
    }
}
