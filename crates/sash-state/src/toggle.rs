#![forbid(unsafe_code)]

//! Shared boolean switch.
//!
//! [`Toggle`] gives callers three intent-named transitions instead of a
//! raw bool setter: `on`, `off`, and `toggle`. Clones share one state
//! cell, so the owner can hand out handles to code that should flip the
//! switch without owning it.

use std::cell::Cell;
use std::rc::Rc;

/// A shared boolean with named transitions.
///
/// Cloning a `Toggle` creates a new handle to the **same** state.
#[derive(Debug, Clone, Default)]
pub struct Toggle {
    state: Rc<Cell<bool>>,
}

impl Toggle {
    /// Create a toggle with the given initial state.
    #[must_use]
    pub fn new(initial: bool) -> Self {
        Self {
            state: Rc::new(Cell::new(initial)),
        }
    }

    /// Current state.
    #[must_use]
    pub fn get(&self) -> bool {
        self.state.get()
    }

    /// Set to `true`. Idempotent.
    pub fn on(&self) {
        self.state.set(true);
    }

    /// Set to `false`. Idempotent.
    pub fn off(&self) {
        self.state.set(false);
    }

    /// Invert the current state and return the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.state.get();
        self.state.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_initial_state() {
        assert!(Toggle::new(true).get());
        assert!(!Toggle::new(false).get());
        assert!(!Toggle::default().get());
    }

    #[test]
    fn on_and_off_are_idempotent() {
        let toggle = Toggle::new(false);
        toggle.on();
        toggle.on();
        assert!(toggle.get());
        toggle.off();
        toggle.off();
        assert!(!toggle.get());
    }

    #[test]
    fn toggle_inverts_and_reports() {
        let toggle = Toggle::new(false);
        assert!(toggle.toggle());
        assert!(!toggle.toggle());
    }

    #[test]
    fn clones_share_state() {
        let toggle = Toggle::new(false);
        let handle = toggle.clone();
        handle.on();
        assert!(toggle.get());
    }
}
