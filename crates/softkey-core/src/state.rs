//! Observable single-threaded state cells.
//!
//! `MutableState` is the only way shared keyboard state changes hands between
//! fields, renderers and the host. Writes notify every subscriber
//! synchronously, inside the same call, and a write that stores a value equal
//! to the current one is silent.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct StateCell<T> {
    value: RefCell<T>,
    listeners: RefCell<SmallVec<[(u64, Listener<T>); 4]>>,
    next_listener_id: Cell<u64>,
}

impl<T> StateCell<T> {
    fn remove_listener(&self, id: u64) {
        self.listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Writable observable value.
pub struct MutableState<T> {
    cell: Rc<StateCell<T>>,
}

/// Read-only view over a [`MutableState`].
pub struct State<T> {
    cell: Rc<StateCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            cell: Rc::new(StateCell {
                value: RefCell::new(initial),
                listeners: RefCell::new(SmallVec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    /// Return a clone of the current value.
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    /// Run `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    /// Store `value` and notify subscribers.
    ///
    /// Returns `false` (and notifies nobody) when `value` equals the stored
    /// value.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.cell.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    /// Apply `f` to a copy of the value and store the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Register `listener`, invoked after every effective write.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe_cell(&self.cell, Rc::new(listener))
    }

    pub fn as_state(&self) -> State<T> {
        State {
            cell: Rc::clone(&self.cell),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.cell.listeners.borrow().len()
    }

    fn notify(&self) {
        let snapshot = self.get();
        // Listeners may subscribe or unsubscribe while being notified, so the
        // list is copied out before anything runs.
        let listeners: SmallVec<[Listener<T>; 4]> = self
            .cell
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<T: Clone + PartialEq + 'static> State<T> {
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe_cell(&self.cell, Rc::new(listener))
    }

    pub fn subscriber_count(&self) -> usize {
        self.cell.listeners.borrow().len()
    }
}

fn subscribe_cell<T: 'static>(cell: &Rc<StateCell<T>>, listener: Listener<T>) -> Subscription {
    let id = cell.next_listener_id.get();
    cell.next_listener_id.set(id + 1);
    cell.listeners.borrow_mut().push((id, listener));

    let weak: Weak<StateCell<T>> = Rc::downgrade(cell);
    Subscription::new(move || {
        if let Some(cell) = weak.upgrade() {
            cell.remove_listener(id);
        }
    })
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.cell.value.borrow())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &*self.cell.value.borrow())
            .finish()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
