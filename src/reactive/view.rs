//! Tracked views over interned objects.

use std::fmt;

use crate::error::Result;
use crate::reactive::store::{ObjectId, ReactiveStore, Slot};
use crate::reactive::ReactiveError;
use crate::value::Value;

/// A field read through a [`TrackedView`]: nested mappings come back as views
/// so reads through them are tracked too.
#[derive(Debug, Clone)]
pub enum Tracked {
    Value(Value),
    Object(TrackedView),
}

impl Tracked {
    /// Flatten to a plain value. Nested objects are read field by field, so
    /// every field below this level is tracked.
    pub fn into_value(self) -> Value {
        match self {
            Tracked::Value(value) => value,
            Tracked::Object(view) => view.read_all(),
        }
    }

    /// The view, if this is a nested object.
    pub fn as_object(&self) -> Option<&TrackedView> {
        match self {
            Tracked::Object(view) => Some(view),
            Tracked::Value(_) => None,
        }
    }
}

/// Read/write access to one object in a [`ReactiveStore`].
///
/// Views are cheap handles; two views of the same object share identity, so
/// subscribers recorded through one fire on writes through the other.
#[derive(Clone)]
pub struct TrackedView {
    store: ReactiveStore,
    object: ObjectId,
}

impl fmt::Debug for TrackedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedView").field("object", &self.object).finish()
    }
}

impl PartialEq for TrackedView {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object
    }
}

impl TrackedView {
    pub(crate) fn new(store: ReactiveStore, object: ObjectId) -> Self {
        Self { store, object }
    }

    /// Identity of the underlying object.
    pub fn id(&self) -> ObjectId {
        self.object
    }

    /// The store this view belongs to.
    pub fn store(&self) -> &ReactiveStore {
        &self.store
    }

    /// Read a field, recording the active subscriber on it. Missing fields
    /// are still tracked so a later write to them notifies.
    pub fn get(&self, field: &str) -> Option<Tracked> {
        self.store.read(self.object, field).map(|slot| self.wrap_slot(slot))
    }

    /// Read a field as a plain value; missing reads as [`Value::Null`].
    pub fn get_value(&self, field: &str) -> Value {
        self.get(field).map(Tracked::into_value).unwrap_or_default()
    }

    /// Assign a field and replay its subscribers.
    pub fn set(&self, field: &str, value: impl Into<Value>) -> Result<()> {
        self.store.write(self.object, field, value.into())
    }

    /// Read a dotted path (`user.name`), tracking every hop.
    pub fn read_path(&self, path: &str) -> Option<Tracked> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Write a dotted path. Every segment but the last must name an object.
    pub fn write_path(&self, path: &str, value: impl Into<Value>) -> Result<()> {
        let (parents, field) = match path.rsplit_once('.') {
            Some((parents, field)) => (Some(parents), field),
            None => (None, path),
        };
        let target = match parents {
            None => self.clone(),
            Some(parents) => self.resolve_object(parents)?,
        };
        target.set(field, value)
    }

    /// The whole object as a plain value, tracking its key set and every
    /// field at every depth.
    pub fn read_all(&self) -> Value {
        let map = self
            .store
            .read_keys(self.object)
            .into_iter()
            .filter_map(|key| {
                let value = self.get(&key)?.into_value();
                Some((key, value))
            })
            .collect();
        Value::Map(map)
    }

    /// Snapshot of the whole object without tracking.
    pub fn to_value(&self) -> Value {
        self.store.snapshot(self.object)
    }

    /// Field names, untracked.
    pub fn keys(&self) -> Vec<String> {
        self.store.keys(self.object)
    }

    fn resolve_object(&self, path: &str) -> Result<TrackedView, ReactiveError> {
        let mut current = self.clone();
        for segment in path.split('.') {
            current = match self.store.peek(current.object, segment) {
                Some(Slot::Object(object)) => TrackedView::new(self.store.clone(), object),
                _ => return Err(ReactiveError::NotAnObject(segment.to_owned())),
            };
        }
        Ok(current)
    }

    fn wrap_slot(&self, slot: Slot) -> Tracked {
        match slot {
            Slot::Object(object) => Tracked::Object(TrackedView::new(self.store.clone(), object)),
            plain => Tracked::Value(self.store.materialize(&plain)),
        }
    }
}
