#![forbid(unsafe_code)]

//! A value backed by keyed storage.
//!
//! [`PersistentValue`] reads its initial content from a
//! [`StorageBackend`] on construction (falling back to a supplied
//! default when nothing usable is stored) and writes through on every
//! [`set`](PersistentValue::set).
//!
//! Setters take a [`SetAction`]: either a replacement value or an
//! updater closure derived from the previous value. The variant is
//! chosen explicitly by the caller and resolved by `match` — there is
//! no runtime inspection of what was passed.

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{StorageBackend, read_value, write_value};

/// How to produce the next value of a [`PersistentValue`].
pub enum SetAction<T> {
    /// Replace the current value.
    Value(T),
    /// Derive the next value from the previous one.
    Updater(Box<dyn FnOnce(T) -> T>),
}

impl<T> SetAction<T> {
    /// Convenience constructor for the updater variant.
    #[must_use]
    pub fn updater(f: impl FnOnce(T) -> T + 'static) -> Self {
        Self::Updater(Box::new(f))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SetAction<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Updater(_) => f.debug_tuple("Updater").finish_non_exhaustive(),
        }
    }
}

/// A value kept in sync with a storage key.
///
/// Write failures during `set` are logged and swallowed: the in-memory
/// value always advances, and a full or broken store degrades to
/// session-only state rather than a fault in the interaction path.
pub struct PersistentValue<T> {
    key: String,
    backend: Rc<dyn StorageBackend>,
    value: T,
}

impl<T: std::fmt::Debug> std::fmt::Debug for PersistentValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: Serialize + DeserializeOwned + Clone> PersistentValue<T> {
    /// Create a persistent value under `key`.
    ///
    /// If the store holds a decodable value for `key` it wins; otherwise
    /// `default` is used (and nothing is written until the first `set`).
    #[must_use]
    pub fn new(backend: Rc<dyn StorageBackend>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = read_value::<T>(backend.as_ref(), &key).unwrap_or(default);
        Self {
            key,
            backend,
            value,
        }
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the current value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Apply a [`SetAction`] and write the result through to storage.
    pub fn set(&mut self, action: SetAction<T>) {
        let next = match action {
            SetAction::Value(value) => value,
            SetAction::Updater(f) => f(self.value.clone()),
        };
        if let Err(error) = write_value(self.backend.as_ref(), &self.key, &next) {
            tracing::error!(key = %self.key, %error, "persistent write failed");
        }
        self.value = next;
    }
}
