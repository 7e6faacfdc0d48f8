//! Counted handles to resources owned by a [`ResourceManager`](crate::ResourceManager).

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Storage cell shared between a manager and its handles.
pub(crate) struct Slot<T> {
    pub(crate) name: String,
    pub(crate) value: T,
    refs: AtomicUsize,
}

impl<T> Slot<T> {
    pub(crate) fn new(name: String, value: T) -> Self {
        Slot {
            name,
            value,
            refs: AtomicUsize::new(0),
        }
    }

    pub(crate) fn refs(&self) -> usize {
        self.refs.load(Ordering::Acquire)
    }
}

/// A counted reference to a named resource.
///
/// Creating a handle (through the manager or by cloning) acquires one
/// reference; dropping it or calling [`Handle::release`] gives it back.
pub struct Handle<T> {
    slot: Arc<Slot<T>>,
}

impl<T> Handle<T> {
    pub(crate) fn acquire(slot: &Arc<Slot<T>>) -> Self {
        slot.refs.fetch_add(1, Ordering::AcqRel);
        Handle { slot: slot.clone() }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    /// Outstanding references to the same resource, this one included.
    pub fn ref_count(&self) -> usize {
        self.slot.refs()
    }

    /// Give the reference back. Same as dropping, spelled out at call sites
    /// where the release is the point.
    pub fn release(self) {
        drop(self);
    }

    /// True when both handles point at the same registered resource.
    pub fn ptr_eq(a: &Handle<T>, b: &Handle<T>) -> bool {
        Arc::ptr_eq(&a.slot, &b.slot)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle::acquire(&self.slot)
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        self.slot.refs.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.slot.value
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("name", &self.slot.name)
            .field("refs", &self.slot.refs())
            .finish()
    }
}
