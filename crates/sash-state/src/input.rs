#![forbid(unsafe_code)]

//! Text-input value with a revisable default.
//!
//! [`InputValue`] tracks a text field's current content alongside the
//! default it should reset to. The default lives in a [`LatestCell`],
//! so long-lived reset paths (a form's "revert" button wired up once)
//! always restore the *current* default, not the one captured when the
//! reset path was built.

use crate::latest::LatestCell;

/// A text value with reset-to-default and clear operations.
#[derive(Debug, Clone)]
pub struct InputValue {
    value: LatestCell<String>,
    default: LatestCell<String>,
}

impl InputValue {
    /// Create an input holding `default`, which is also the reset target.
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            value: LatestCell::new(default.clone()),
            default: LatestCell::new(default),
        }
    }

    /// Current content.
    #[must_use]
    pub fn get(&self) -> String {
        self.value.get()
    }

    /// Replace the current content.
    pub fn set(&self, value: impl Into<String>) {
        self.value.set(value.into());
    }

    /// Replace the default without touching the current content.
    pub fn set_default(&self, default: impl Into<String>) {
        self.default.set(default.into());
    }

    /// Restore the current default.
    pub fn reset(&self) {
        self.value.set(self.default.get());
    }

    /// Empty the content. The default is untouched.
    pub fn clear(&self) {
        self.value.set(String::new());
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.with(String::is_empty)
    }
}
