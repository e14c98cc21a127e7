#![forbid(unsafe_code)]

//! Drag-to-resize splitter controller.
//!
//! A [`Splitter`] owns one persisted size along a single axis. The host
//! reports a press on the splitter handle via
//! [`pointer_down`](Splitter::pointer_down); the controller then
//! registers scoped move/up listeners on the hub for the duration of
//! the drag and removes them when the pointer is released. Outside a
//! drag the controller listens to nothing.
//!
//! # Drag model
//!
//! The press anchors the pointer position and the size at that moment.
//! Every accepted move recomputes `anchor_size + (position -
//! anchor_position)` from the anchors, so the handle never drifts over
//! a long drag the way incremental deltas would.
//!
//! Moves are throttled (~10ms): a move inside a closed window parks its
//! position in a single pending slot, latest wins. The slot is flushed
//! through the gate by [`poll`](Splitter::poll) and unconditionally on
//! pointer-up, so the final position is never lost to the throttle.
//!
//! # Invariants
//!
//! 1. An accepted size `s` always satisfies `min < s < max` (strict).
//!    An out-of-bounds candidate is rejected outright, never clamped,
//!    so the size freezes at the last accepted value until the pointer
//!    returns to the acceptable range.
//! 2. Move/up listeners are live exactly while a drag is active.
//! 3. Every accepted size is written through to storage immediately.
//!
//! # Failure Modes
//!
//! Storage write failures are logged and swallowed inside
//! [`PersistentValue`]; a broken store degrades to session-only sizing
//! and never interrupts the drag.

use std::cell::RefCell;
use std::rc::Rc;

use web_time::{Duration, Instant};

use sash_core::{Axis, EventHub, ListenerGuard, PointerEvent};

use crate::persistent::{PersistentValue, SetAction};
use crate::rate_limit::ThrottleGate;
use crate::store::StorageBackend;

/// Minimum interval between applied drag moves.
const MOVE_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for a [`Splitter`].
///
/// Construct with struct-update syntax over [`SplitterConfig::new`]:
///
/// ```
/// use sash_core::Axis;
/// use sash_state::SplitterConfig;
///
/// let config = SplitterConfig {
///     min: 50.0,
///     max: 500.0,
///     initial: 200.0,
///     ..SplitterConfig::new(Axis::X, "sidebar-width")
/// };
/// ```
pub struct SplitterConfig {
    /// The axis the splitter moves along.
    pub axis: Axis,
    /// Default size when storage holds nothing usable for `cache_key`.
    pub initial: f64,
    /// Storage key the size is persisted under.
    pub cache_key: String,
    /// Lower bound on the size: exclusive for drag-accepted candidates,
    /// inclusive when clamping `initial` at construction.
    pub min: f64,
    /// Upper bound on the size: exclusive for drag-accepted candidates,
    /// inclusive when clamping `initial` at construction.
    pub max: f64,
    /// Measure the pointer from the far edge of the viewport instead of
    /// the near edge. A panel anchored to the right/bottom grows as the
    /// pointer moves toward the origin.
    pub reverse: bool,
    /// Invoked when a drag begins.
    pub on_resize_start: Option<Rc<dyn Fn()>>,
    /// Invoked when a drag ends.
    pub on_resize_end: Option<Rc<dyn Fn()>>,
}

impl SplitterConfig {
    /// A config with the given axis and storage key; everything else at
    /// its default (`initial` 0, unbounded, not reversed, no callbacks).
    #[must_use]
    pub fn new(axis: Axis, cache_key: impl Into<String>) -> Self {
        Self {
            axis,
            initial: 0.0,
            cache_key: cache_key.into(),
            min: 0.0,
            max: f64::INFINITY,
            reverse: false,
            on_resize_start: None,
            on_resize_end: None,
        }
    }
}

impl std::fmt::Debug for SplitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitterConfig")
            .field("axis", &self.axis)
            .field("initial", &self.initial)
            .field("cache_key", &self.cache_key)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("reverse", &self.reverse)
            .finish_non_exhaustive()
    }
}

/// Anchors and pending state for one active drag.
#[derive(Debug)]
struct DragSession {
    anchor_position: f64,
    anchor_size: f64,
    /// Latest position held back by the throttle, if any.
    pending: Option<f64>,
}

struct SplitterInner {
    hub: EventHub,
    axis: Axis,
    min: f64,
    max: f64,
    reverse: bool,
    on_resize_start: Option<Rc<dyn Fn()>>,
    on_resize_end: Option<Rc<dyn Fn()>>,
    value: PersistentValue<f64>,
    gate: ThrottleGate,
    session: Option<DragSession>,
    move_guard: Option<ListenerGuard>,
    up_guard: Option<ListenerGuard>,
}

impl SplitterInner {
    /// Pointer position along the drag axis, measured from the near
    /// edge, or from the far edge when reversed.
    fn track_position(&self, event: &PointerEvent) -> f64 {
        let raw = self.axis.of(event);
        if self.reverse {
            self.axis.extent_of(self.hub.viewport()) - raw
        } else {
            raw
        }
    }

    /// Accept or reject the candidate size for `position`.
    fn apply(&mut self, position: f64) {
        let Some(session) = &self.session else {
            return;
        };
        let candidate = session.anchor_size + (position - session.anchor_position);
        if self.min < candidate && candidate < self.max {
            self.value.set(SetAction::Value(candidate));
        } else {
            tracing::trace!(
                candidate,
                min = self.min,
                max = self.max,
                "size candidate out of bounds, retaining current size"
            );
        }
    }

    fn take_pending(&mut self) -> Option<f64> {
        self.session.as_mut().and_then(|session| session.pending.take())
    }
}

/// A drag-to-resize controller for one panel edge.
///
/// Dropping the splitter mid-drag detaches its listeners; the drag
/// simply ends without an `on_resize_end` notification.
pub struct Splitter {
    inner: Rc<RefCell<SplitterInner>>,
}

impl std::fmt::Debug for Splitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Splitter")
            .field("axis", &inner.axis)
            .field("size", inner.value.value())
            .field("dragging", &inner.session.is_some())
            .finish_non_exhaustive()
    }
}

impl Splitter {
    /// Create a splitter persisting its size under `config.cache_key`.
    ///
    /// A decodable stored size wins over `config.initial`; the initial
    /// itself is clamped into `[min, max]` before use as the default.
    #[must_use]
    pub fn new(hub: &EventHub, backend: Rc<dyn StorageBackend>, config: SplitterConfig) -> Self {
        let default = config.initial.clamp(config.min, config.max);
        let value = PersistentValue::new(backend, config.cache_key, default);
        Self {
            inner: Rc::new(RefCell::new(SplitterInner {
                hub: hub.clone(),
                axis: config.axis,
                min: config.min,
                max: config.max,
                reverse: config.reverse,
                on_resize_start: config.on_resize_start,
                on_resize_end: config.on_resize_end,
                value,
                gate: ThrottleGate::new(MOVE_INTERVAL),
                session: None,
                move_guard: None,
                up_guard: None,
            })),
        }
    }

    /// Current size.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.inner.borrow().value.get()
    }

    /// The storage key the size persists under.
    #[must_use]
    pub fn key(&self) -> String {
        self.inner.borrow().value.key().to_owned()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// Begin a drag from a press on the splitter handle.
    ///
    /// The host calls this when the pointer-down landed on its handle;
    /// the hub cannot know where the handle is. Move and up listeners
    /// are registered here and released on pointer-up. A second press
    /// during an active drag is ignored.
    pub fn pointer_down(&self, event: &PointerEvent) {
        let (hub, on_start) = {
            let mut inner = self.inner.borrow_mut();
            if inner.session.is_some() {
                return;
            }
            let anchor_position = inner.track_position(event);
            let anchor_size = inner.value.get();
            tracing::debug!(anchor_position, anchor_size, "drag started");
            inner.session = Some(DragSession {
                anchor_position,
                anchor_size,
                pending: None,
            });
            inner.gate.reset();
            (inner.hub.clone(), inner.on_resize_start.clone())
        };

        let weak = Rc::downgrade(&self.inner);
        let move_guard = hub.on_pointer_move(move |event, now| {
            if let Some(inner) = weak.upgrade() {
                handle_move(&inner, event, now);
            }
        });
        let weak = Rc::downgrade(&self.inner);
        let up_guard = hub.on_pointer_up(move |event, now| {
            if let Some(inner) = weak.upgrade() {
                handle_up(&inner, event, now);
            }
        });
        {
            let mut inner = self.inner.borrow_mut();
            inner.move_guard = Some(move_guard);
            inner.up_guard = Some(up_guard);
        }

        if let Some(callback) = on_start {
            callback();
        }
    }

    /// Flush a throttle-held move, if its window has elapsed.
    ///
    /// Hosts pump this from their frame loop so a pointer that stops
    /// moving mid-window still lands on its final position.
    pub fn poll(&self, now: Instant) {
        let mut inner = self.inner.borrow_mut();
        let Some(pending) = inner.session.as_ref().and_then(|session| session.pending) else {
            return;
        };
        if inner.gate.try_pass(now) {
            inner.apply(pending);
            inner.take_pending();
        }
    }
}

fn handle_move(inner: &Rc<RefCell<SplitterInner>>, event: &PointerEvent, now: Instant) {
    let mut inner = inner.borrow_mut();
    if inner.session.is_none() {
        return;
    }
    let position = inner.track_position(event);
    if inner.gate.try_pass(now) {
        inner.apply(position);
        inner.take_pending();
    } else if let Some(session) = inner.session.as_mut() {
        session.pending = Some(position);
    }
}

fn handle_up(inner: &Rc<RefCell<SplitterInner>>, _event: &PointerEvent, _now: Instant) {
    let on_end = {
        let mut inner = inner.borrow_mut();
        if inner.session.is_none() {
            return;
        }
        // The final position always lands, gate or no gate.
        if let Some(pending) = inner.take_pending() {
            inner.apply(pending);
        }
        tracing::debug!(size = inner.value.get(), "drag ended");
        inner.session = None;
        // Safe mid-dispatch: the hub holds a strong reference to the
        // callback it is currently invoking.
        inner.move_guard = None;
        inner.up_guard = None;
        inner.on_resize_end.clone()
    };
    if let Some(callback) = on_end {
        callback();
    }
}
