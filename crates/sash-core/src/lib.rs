#![forbid(unsafe_code)]

//! Input events, hit regions, and scoped listener registration.
//!
//! `sash-core` is the foundation of the sashkit workspace. It defines the
//! canonical pointer/viewport event types, the [`Region`] hit-testing
//! primitive, and the [`EventHub`] — a single-threaded dispatch registry
//! whose registrations are RAII guards, so attaching and detaching a
//! listener is always symmetric.
//!
//! # Role in sashkit
//! Hosts translate their native input stream into [`Event`] values and
//! feed them to an [`EventHub`] via `dispatch`. The stateful helpers in
//! `sash-state` (splitter controller, outside-click detector, resize
//! listener) attach to the hub and react to dispatched events.

pub mod event;
pub mod hub;
pub mod region;

pub use event::{Axis, Event, PointerEvent, PointerEventKind};
pub use hub::{EventHub, ListenerGuard};
pub use region::Region;
