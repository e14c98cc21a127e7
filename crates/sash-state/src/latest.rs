#![forbid(unsafe_code)]

//! A latest-value cell with no change notification.
//!
//! Long-lived callbacks capture values at registration time and would
//! otherwise read stale state forever. [`LatestCell`] breaks that
//! pattern: the callback captures a clone of the cell and reads through
//! it at invocation time, always observing the most recent `set`.
//!
//! Updating the cell deliberately notifies nobody. It is the complement
//! of an observable: reads are pulled, never pushed.

use std::cell::RefCell;
use std::rc::Rc;

/// A shared slot holding the most recently written value.
///
/// Cloning a `LatestCell` creates a new handle to the **same** slot.
#[derive(Debug, Default)]
pub struct LatestCell<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for LatestCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> LatestCell<T> {
    /// Create a cell holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Replace the held value. No observers are notified.
    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    /// Read through the held value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }
}

impl<T: Clone> LatestCell<T> {
    /// Clone out the held value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}
