#![forbid(unsafe_code)]

//! Sashkit public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! # Quick start
//!
//! ```
//! use std::rc::Rc;
//! use sashkit::prelude::*;
//!
//! let hub = EventHub::new();
//! hub.set_viewport(1280.0, 720.0);
//!
//! let backend: Rc<dyn StorageBackend> = Rc::new(MemoryStorage::new());
//! let sidebar = Splitter::new(
//!     &hub,
//!     backend,
//!     SplitterConfig {
//!         min: 50.0,
//!         max: 500.0,
//!         initial: 200.0,
//!         ..SplitterConfig::new(Axis::X, "sidebar-width")
//!     },
//! );
//! assert_eq!(sidebar.size(), 200.0);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use sash_core::{
    Axis, Event, EventHub, ListenerGuard, PointerEvent, PointerEventKind, Region,
};

// --- State re-exports ------------------------------------------------------

pub use sash_state::{
    DebouncedEffect, Debouncer, FileStorage, InputValue, LatestCell, MemoryStorage,
    OutsideClickDetector, PersistentValue, ResizeOptions, SetAction, Splitter, SplitterConfig,
    StorageBackend, StorageError, Stored, ThrottleGate, ThrottledEffect, Throttler, Toggle,
    WindowResizeListener, read_value, write_value,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Axis, Event, EventHub, MemoryStorage, PointerEvent, Region, SetAction, Splitter,
        SplitterConfig, StorageBackend, Stored, Toggle,
    };

    pub use crate::{core, state};
}

pub use sash_core as core;
pub use sash_state as state;
