//! Observable state containers
//!
//! A `Container<T>` holds exactly one current value and pushes every change
//! to its subscribers synchronously, in subscription order. New subscribers
//! are replayed the current value immediately.
//!
//! Containers are cheap `Rc` handles: cloning one yields another handle onto
//! the same cell, so the simulation, input handlers and renderers can each
//! keep their own copy. Everything is single-threaded; an `update` and its
//! notification fan-out finish before control returns to the caller.
//!
//! Constraints on subscribers:
//! - A callback must not panic. Behaviour after a panicking callback is
//!   unspecified.
//! - A callback may update the container it is subscribed to. The nested
//!   update lands immediately, but its fan-out waits until the current one
//!   has reached every subscriber, so each subscriber ends on the latest
//!   value. A callback that writes on every notification never settles.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Subscriber<T> {
    id: u64,
    callback: Callback<T>,
}

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_id: Cell<u64>,
    /// A fan-out is in progress
    publishing: Cell<bool>,
    /// The value changed during the current fan-out
    dirty: Cell<bool>,
}

/// Shallow merge of a partial record into a full one
///
/// Implemented by structured records (paddles, ball) for their patch types.
/// Fields left as `None` in the patch keep their current value.
pub trait Patch<P> {
    fn patch(&mut self, partial: P);
}

/// A reactive cell holding one current value
pub struct Container<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Container<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Container<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Container<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                publishing: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    /// Snapshot of the current value
    pub fn current_value(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value and publish it
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.publish();
    }

    /// Merge a partial into the current value, publish and return the result
    pub fn update<P>(&self, partial: P) -> T
    where
        T: Patch<P>,
    {
        self.modify(|value| value.patch(partial))
    }

    /// Edit the value in place, publish and return the result
    ///
    /// The read and the write happen inside the container, so callers never
    /// race a stale snapshot against another writer.
    pub fn modify(&self, f: impl FnOnce(&mut T)) -> T {
        f(&mut self.inner.value.borrow_mut());
        self.publish()
    }

    /// Register a callback; it runs once right away with the current value
    /// and then after every update until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            callback: Rc::clone(&callback),
        });

        let current = self.current_value();
        (&mut *callback.borrow_mut())(&current);

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().retain(|s| s.id != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Store a value without notifying anyone
    ///
    /// Pair with [`Container::publish`] when several containers must all hold
    /// their new values before any subscriber hears about one of them.
    pub(crate) fn stage(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
    }

    /// Push the current value to every subscriber and return it
    pub(crate) fn publish(&self) -> T {
        if self.inner.publishing.get() {
            self.inner.dirty.set(true);
            log::trace!("Deferred nested update until the current fan-out finishes");
            return self.current_value();
        }

        self.inner.publishing.set(true);
        let mut value = self.current_value();
        loop {
            self.inner.dirty.set(false);
            self.fan_out(&value);
            if !self.inner.dirty.get() {
                break;
            }
            value = self.current_value();
        }
        self.inner.publishing.set(false);
        value
    }

    fn fan_out(&self, value: &T) {
        // Snapshot the list so callbacks may subscribe or unsubscribe freely
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| Rc::clone(&s.callback))
            .collect();

        for callback in callbacks {
            (&mut *callback.borrow_mut())(value);
        }
    }
}

/// Handle to a registered callback
///
/// Dropping it unsubscribes. Call [`Subscription::detach`] to keep the
/// callback registered for the container's whole lifetime.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Leave the callback registered permanently
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
