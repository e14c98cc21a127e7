#![forbid(unsafe_code)]

//! Scoped listener registration and event dispatch.
//!
//! [`EventHub`] replaces imperative add/remove listener pairs with an
//! acquire/release discipline: registering a listener returns a
//! [`ListenerGuard`], and dropping the guard deregisters the listener.
//! Release is therefore guaranteed on every exit path — early returns,
//! error paths, and panics unwinding the owner all detach the listener.
//!
//! # Design
//!
//! Callbacks are stored as `Weak` references; the guard holds the only
//! strong reference. Dead entries are pruned lazily during dispatch, the
//! same way a dropped subscriber disappears from a notification list.
//!
//! # Invariants
//!
//! 1. A listener is never invoked after its guard is dropped.
//! 2. Listeners are invoked in registration order.
//! 3. Listeners registered *during* a dispatch are not invoked by that
//!    dispatch (the live set is snapshotted before invocation), so
//!    callbacks may attach/detach listeners reentrantly.
//! 4. The hub tracks the viewport extent: a dispatched `Resize` event
//!    updates it before resize listeners run.
//!
//! # Thread Safety
//!
//! `EventHub` is single-threaded (`Rc`-based). Clone the handle freely;
//! all clones share one listener registry.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_time::Instant;

use crate::event::{Event, PointerEvent, PointerEventKind};

type PointerCallback = dyn Fn(&PointerEvent, Instant);
type ResizeCallback = dyn Fn(f64, f64);

struct HubInner {
    viewport: (f64, f64),
    pointer_down: Vec<Weak<PointerCallback>>,
    pointer_move: Vec<Weak<PointerCallback>>,
    pointer_up: Vec<Weak<PointerCallback>>,
    resize: Vec<Weak<ResizeCallback>>,
}

/// A single-threaded event dispatch registry with scoped registrations.
///
/// Cloning an `EventHub` creates a new handle to the **same** registry.
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl Clone for EventHub {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventHub")
            .field("viewport", &inner.viewport)
            .field("pointer_down", &live_count(&inner.pointer_down))
            .field("pointer_move", &live_count(&inner.pointer_move))
            .field("pointer_up", &live_count(&inner.pointer_up))
            .field("resize", &live_count(&inner.resize))
            .finish()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    /// Create a hub with a zero-sized viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                viewport: (0.0, 0.0),
                pointer_down: Vec::new(),
                pointer_move: Vec::new(),
                pointer_up: Vec::new(),
                resize: Vec::new(),
            })),
        }
    }

    /// Current viewport extent as `(width, height)`.
    ///
    /// Updated by dispatched [`Event::Resize`] events and by
    /// [`set_viewport`](Self::set_viewport).
    #[must_use]
    pub fn viewport(&self) -> (f64, f64) {
        self.inner.borrow().viewport
    }

    /// Set the viewport extent directly (typically once, at startup).
    pub fn set_viewport(&self, width: f64, height: f64) {
        self.inner.borrow_mut().viewport = (width, height);
    }

    /// Register a pointer-down listener. Dropping the guard deregisters it.
    #[must_use]
    pub fn on_pointer_down(&self, callback: impl Fn(&PointerEvent, Instant) + 'static) -> ListenerGuard {
        let strong: Rc<PointerCallback> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .pointer_down
            .push(Rc::downgrade(&strong));
        tracing::debug!(kind = "pointer_down", "listener attached");
        ListenerGuard {
            _guard: Box::new(strong),
        }
    }

    /// Register a pointer-move listener. Dropping the guard deregisters it.
    #[must_use]
    pub fn on_pointer_move(&self, callback: impl Fn(&PointerEvent, Instant) + 'static) -> ListenerGuard {
        let strong: Rc<PointerCallback> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .pointer_move
            .push(Rc::downgrade(&strong));
        tracing::debug!(kind = "pointer_move", "listener attached");
        ListenerGuard {
            _guard: Box::new(strong),
        }
    }

    /// Register a pointer-up listener. Dropping the guard deregisters it.
    #[must_use]
    pub fn on_pointer_up(&self, callback: impl Fn(&PointerEvent, Instant) + 'static) -> ListenerGuard {
        let strong: Rc<PointerCallback> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .pointer_up
            .push(Rc::downgrade(&strong));
        tracing::debug!(kind = "pointer_up", "listener attached");
        ListenerGuard {
            _guard: Box::new(strong),
        }
    }

    /// Register a viewport-resize listener. Dropping the guard deregisters it.
    #[must_use]
    pub fn on_resize(&self, callback: impl Fn(f64, f64) + 'static) -> ListenerGuard {
        let strong: Rc<ResizeCallback> = Rc::new(callback);
        self.inner.borrow_mut().resize.push(Rc::downgrade(&strong));
        tracing::debug!(kind = "resize", "listener attached");
        ListenerGuard {
            _guard: Box::new(strong),
        }
    }

    /// Dispatch an event to the matching listener set.
    ///
    /// `now` is threaded through to pointer listeners so time-dependent
    /// consumers (throttles, drag controllers) stay deterministic.
    pub fn dispatch(&self, event: &Event, now: Instant) {
        match event {
            Event::Pointer(pointer) => {
                let callbacks = {
                    let mut inner = self.inner.borrow_mut();
                    let set = match pointer.kind {
                        PointerEventKind::Down => &mut inner.pointer_down,
                        PointerEventKind::Move => &mut inner.pointer_move,
                        PointerEventKind::Up => &mut inner.pointer_up,
                    };
                    snapshot(set)
                };
                for callback in callbacks.iter().filter_map(Weak::upgrade) {
                    callback(pointer, now);
                }
            }
            Event::Resize { width, height } => {
                let callbacks = {
                    let mut inner = self.inner.borrow_mut();
                    inner.viewport = (*width, *height);
                    snapshot(&mut inner.resize)
                };
                for callback in callbacks.iter().filter_map(Weak::upgrade) {
                    callback(*width, *height);
                }
            }
        }
    }

    /// Number of live pointer-down listeners.
    #[must_use]
    pub fn pointer_down_listeners(&self) -> usize {
        live_count(&self.inner.borrow().pointer_down)
    }

    /// Number of live pointer-move listeners.
    #[must_use]
    pub fn pointer_move_listeners(&self) -> usize {
        live_count(&self.inner.borrow().pointer_move)
    }

    /// Number of live pointer-up listeners.
    #[must_use]
    pub fn pointer_up_listeners(&self) -> usize {
        live_count(&self.inner.borrow().pointer_up)
    }

    /// Number of live resize listeners.
    #[must_use]
    pub fn resize_listeners(&self) -> usize {
        live_count(&self.inner.borrow().resize)
    }
}

/// Prune dead entries and clone the live set.
///
/// The clone keeps the registry borrow short, so callbacks may register
/// or deregister listeners reentrantly. Entries stay `Weak` and are
/// upgraded one by one at invocation time: a guard dropped by an
/// earlier listener in the same dispatch makes the upgrade fail, so the
/// deregistered listener never sees the in-flight event.
fn snapshot<C: ?Sized>(set: &mut Vec<Weak<C>>) -> Vec<Weak<C>> {
    set.retain(|weak| weak.strong_count() > 0);
    set.clone()
}

fn live_count<C: ?Sized>(set: &[Weak<C>]) -> usize {
    set.iter().filter(|weak| weak.strong_count() > 0).count()
}

/// RAII guard for a registered listener.
///
/// Dropping the guard drops the only strong reference to the callback,
/// so the hub's `Weak` entry fails to upgrade and is pruned on the next
/// dispatch of that event kind.
pub struct ListenerGuard {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").finish_non_exhaustive()
    }
}
