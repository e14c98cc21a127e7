#![forbid(unsafe_code)]

//! Outside-press detection.
//!
//! [`OutsideClickDetector`] watches a set of rectangular regions and
//! fires its callback when a pointer-down lands outside **every** one
//! of them. A press inside any single watched region suppresses the
//! firing, which is what dismissable overlays want: clicking the
//! trigger button or the popup itself keeps it open, clicking anywhere
//! else closes it.
//!
//! Detection uses pointer-down, not up, so a press-and-drag that starts
//! outside fires immediately.

use std::cell::RefCell;
use std::rc::Rc;

use sash_core::{EventHub, ListenerGuard, Region};

/// Fires a callback on pointer-down events outside all watched regions.
///
/// Detaches from the hub when dropped.
pub struct OutsideClickDetector {
    hub: EventHub,
    regions: Rc<RefCell<Vec<Region>>>,
    callback: Rc<dyn Fn()>,
    guard: ListenerGuard,
}

impl std::fmt::Debug for OutsideClickDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsideClickDetector")
            .field("regions", &self.regions.borrow().len())
            .finish_non_exhaustive()
    }
}

impl OutsideClickDetector {
    /// Attach to `hub`, watching `regions`.
    ///
    /// An empty region set means every press is outside, so the
    /// callback fires on every pointer-down until regions are supplied
    /// via [`set_regions`](Self::set_regions).
    #[must_use]
    pub fn attach(hub: &EventHub, regions: Vec<Region>, callback: impl Fn() + 'static) -> Self {
        let regions = Rc::new(RefCell::new(regions));
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let guard = register(hub, &regions, &callback);
        Self {
            hub: hub.clone(),
            regions,
            callback,
            guard,
        }
    }

    /// Replace the watched regions.
    ///
    /// Takes effect for the next dispatched pointer-down; the listener
    /// registration itself is untouched.
    pub fn set_regions(&self, regions: Vec<Region>) {
        *self.regions.borrow_mut() = regions;
    }

    /// Swap both the watched regions and the callback.
    ///
    /// No dispatch can observe an intermediate state: the old
    /// registration is released within this call, so the detector never
    /// answers to two live registrations.
    pub fn retarget(&mut self, regions: Vec<Region>, callback: impl Fn() + 'static) {
        *self.regions.borrow_mut() = regions;
        self.callback = Rc::new(callback);
        self.guard = register(&self.hub, &self.regions, &self.callback);
    }
}

fn register(
    hub: &EventHub,
    regions: &Rc<RefCell<Vec<Region>>>,
    callback: &Rc<dyn Fn()>,
) -> ListenerGuard {
    let regions = Rc::clone(regions);
    let callback = Rc::clone(callback);
    hub.on_pointer_down(move |event, _now| {
        let outside_all = regions
            .borrow()
            .iter()
            .all(|region| !region.contains(event.x, event.y));
        if outside_all {
            callback();
        }
    })
}
