#![forbid(unsafe_code)]

//! Stateful UI helpers: persisted values, rate limiting, and the
//! resizable splitter controller.
//!
//! # Key Components
//!
//! - [`StorageBackend`] / [`MemoryStorage`] / [`FileStorage`] — keyed
//!   JSON text storage with an explicit [`Stored`] absent sentinel
//! - [`PersistentValue`] — a value read from storage on creation and
//!   written through on every set
//! - [`Debouncer`] / [`Throttler`] — deterministic rate-limiting state
//!   machines with an explicit pending slot
//! - [`Toggle`] — shared boolean on/off/toggle handle
//! - [`LatestCell`] — notification-free latest-value cell
//! - [`OutsideClickDetector`] — fires when a pointer-down lands outside
//!   every watched region
//! - [`WindowResizeListener`] — viewport-resize subscription with an
//!   optional leading invocation
//! - [`Splitter`] — the drag-to-resize controller tying the above
//!   together
//!
//! # How it fits in the system
//! Everything here attaches to a `sash-core` [`EventHub`](sash_core::EventHub)
//! and reacts to dispatched events; nothing spawns threads or installs
//! global handlers behind the host's back.

pub mod input;
pub mod latest;
pub mod outside;
pub mod persistent;
pub mod rate_limit;
pub mod splitter;
pub mod store;
pub mod toggle;
pub mod window;

pub use input::InputValue;
pub use latest::LatestCell;
pub use outside::OutsideClickDetector;
pub use persistent::{PersistentValue, SetAction};
pub use rate_limit::{DebouncedEffect, Debouncer, ThrottleGate, ThrottledEffect, Throttler};
pub use splitter::{Splitter, SplitterConfig};
pub use store::{FileStorage, MemoryStorage, StorageBackend, StorageError, Stored, read_value, write_value};
pub use toggle::Toggle;
pub use window::{ResizeOptions, WindowResizeListener};
