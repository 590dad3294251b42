//! Observable value cells.
//!
//! An `Observable<T>` is a shared handle to one mutable value plus an
//! ordered list of subscriber callbacks. Cloning the handle does not copy
//! the value: both handles see the same cell.
//!
//! ## Notification
//!
//! Every `set`/`update`/`modify` call replaces the value and then runs each
//! live subscriber, in registration order, before returning. No `RefCell`
//! borrow is held while callbacks run, so a subscriber may read this cell,
//! read other cells, or even write back into this cell.
//!
//! A write made from inside one of this cell's own callbacks updates the
//! value at once, but its notification is queued. The round in progress
//! finishes first, then the queued values are delivered in write order.
//! Every subscriber therefore sees the values in the same order, and the
//! last value each one sees is the cell's final value.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tcg_board::reactive::Observable;
//!
//! let cell = Observable::new(1);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let log = Rc::clone(&seen);
//! let sub = cell.subscribe(move |v| log.borrow_mut().push(*v));
//!
//! cell.set(2);
//! cell.update(|v| v * 10);
//! sub.unsubscribe();
//! cell.set(99);
//!
//! assert_eq!(*seen.borrow(), vec![1, 2, 20]);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

struct Subscriber<T> {
    id: u64,
    active: Cell<bool>,
    callback: Box<dyn Fn(&T)>,
}

struct Inner<T> {
    value: T,
    version: u64,
    next_id: u64,
    subscribers: Vec<Rc<Subscriber<T>>>,
    /// Values written but not yet delivered.
    pending: VecDeque<T>,
    /// A notification round is running.
    notifying: bool,
}

/// Shared, single-threaded value cell with synchronous change notification.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a cell holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// `f` must not write to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.modify(|current| *current = value);
    }

    /// `set(f(get()))`.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Mutate in place, notify once, and return whatever `f` returns.
    ///
    /// This is the read-modify-write primitive the collection types build
    /// on: the mutation and the notification happen within one call.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner.value);
            inner.version += 1;
            let snapshot = inner.value.clone();
            inner.pending.push_back(snapshot);
            if inner.notifying {
                // The running round delivers it
                return result;
            }
            inner.notifying = true;
            result
        };

        self.drain();
        result
    }

    /// Deliver queued values one round at a time, in write order.
    fn drain(&self) {
        loop {
            let (value, subscribers) = {
                let mut inner = self.inner.borrow_mut();
                let Some(value) = inner.pending.pop_front() else {
                    inner.notifying = false;
                    return;
                };
                let subscribers: Vec<_> = inner.subscribers.iter().map(Rc::clone).collect();
                (value, subscribers)
            };

            for subscriber in subscribers {
                if subscriber.active.get() {
                    (subscriber.callback)(&value);
                }
            }
        }
    }

    /// Register `f` and call it once with the current value.
    ///
    /// The returned [`Subscription`] removes the callback when
    /// [`Subscription::unsubscribe`] is called. Dropping it without calling
    /// `unsubscribe` leaves the callback registered.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let (subscriber, current) = {
            let mut inner = self.inner.borrow_mut();
            let subscriber = Rc::new(Subscriber {
                id: inner.next_id,
                active: Cell::new(true),
                callback: Box::new(f),
            });
            inner.next_id += 1;
            inner.subscribers.push(Rc::clone(&subscriber));
            (subscriber, inner.value.clone())
        };

        (subscriber.callback)(&current);

        let cell: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        let id = subscriber.id;
        let subscriber = Rc::downgrade(&subscriber);
        Subscription {
            detach: Box::new(move || {
                if let Some(subscriber) = subscriber.upgrade() {
                    subscriber.active.set(false);
                }
                if let Some(cell) = cell.upgrade() {
                    cell.borrow_mut().subscribers.retain(|s| s.id != id);
                }
            }),
        }
    }

    /// Number of completed `set`/`update`/`modify` calls.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// True if both handles point at the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Observable")
                .field("value", &inner.value)
                .field("version", &inner.version)
                .field("subscribers", &inner.subscribers.len())
                .finish(),
            Err(_) => f.write_str("Observable { <borrowed> }"),
        }
    }
}

/// Handle that removes a subscriber from its cell.
pub struct Subscription {
    detach: Box<dyn FnOnce()>,
}

impl Subscription {
    /// Remove the callback. It will not run again, even if a notification
    /// is currently in progress.
    pub fn unsubscribe(self) {
        (self.detach)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}
