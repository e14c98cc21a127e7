#![forbid(unsafe_code)]

//! Keyed text storage with an explicit absent sentinel.
//!
//! A [`StorageBackend`] is a shared, process-wide keyed map of JSON
//! text. Entries are owned by whichever feature chose the key; key
//! collisions across features are a caller responsibility. There is no
//! concurrency control: concurrent writers to one key race and the last
//! write wins.
//!
//! # The absent sentinel
//!
//! [`read_value`] returns [`Stored<T>`], a two-variant sentinel that
//! keeps "no value stored" distinct from every valid stored value —
//! including `0`, `false`, and `""`, which a truthiness check would
//! conflate with absence. Malformed stored text also reads as
//! [`Stored::Absent`] (with a warning log), never as an error.
//!
//! # Failure Modes
//!
//! - Backend read errors degrade to `Absent` in the typed layer; the
//!   raw [`StorageBackend::read`] surfaces them as [`StorageError`].
//! - Write errors are always surfaced by [`write_value`]; callers that
//!   treat writes as fire-and-forget log and drop them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A keyed JSON text store.
///
/// Values are serialized JSON documents. `read` of a missing key
/// returns `Ok(None)` — absence is not an error.
pub trait StorageBackend {
    /// Fetch the stored text for `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `text` under `key`, overwriting any prior content.
    fn write(&self, key: &str, text: &str) -> Result<(), StorageError>;
}

/// An in-process storage backend.
///
/// Cloning a `MemoryStorage` creates a new handle to the **same** map,
/// so clones model the shared, process-wide store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, text: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), text.to_owned());
        Ok(())
    }
}

/// A file-backed storage backend.
///
/// All keys live in one JSON object file. Writes use a
/// temp-file-then-rename pattern so a crash mid-write never leaves a
/// truncated file behind. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a backend over the given file path. The parent directory
    /// must already exist; the file itself need not.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<serde_json::Map<String, serde_json::Value>, StorageError> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let map = serde_json::from_str(&contents)?;
        Ok(map)
    }

    fn save(&self, map: &serde_json::Map<String, serde_json::Value>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(map)?;
        // Atomic write: temp file then rename
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load()?;
        match map.get(key) {
            Some(value) => Ok(Some(serde_json::to_string(value)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, text: &str) -> Result<(), StorageError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let mut map = self.load()?;
        map.insert(key.to_owned(), value);
        self.save(&map)
    }
}

/// The result of a typed read: either a decoded value or an explicit
/// "nothing stored" marker.
///
/// `Absent` is distinct from any decoded value, including falsy ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stored<T> {
    /// A value was stored and decoded.
    Present(T),
    /// No value stored, or the stored text was unreadable.
    Absent,
}

impl<T> Stored<T> {
    /// Whether a value is present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Whether no value is present.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The stored value, or `default` when absent.
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => default,
        }
    }

    /// The stored value, or the result of `f` when absent.
    #[must_use]
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => f(),
        }
    }
}

/// Read and decode the value stored under `key`.
///
/// Missing keys, undecodable text, and backend read failures all map
/// to [`Stored::Absent`]; the latter two emit a `tracing::warn!`.
pub fn read_value<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Stored<T> {
    match backend.read(key) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => Stored::Present(value),
            Err(error) => {
                tracing::warn!(key, %error, "stored value undecodable, treating as absent");
                Stored::Absent
            }
        },
        Ok(None) => Stored::Absent,
        Err(error) => {
            tracing::warn!(key, %error, "storage read failed, treating as absent");
            Stored::Absent
        }
    }
}

/// Serialize `value` and store it under `key`.
pub fn write_value<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let text = serde_json::to_string(value)?;
    backend.write(key, &text)
}
