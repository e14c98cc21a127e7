#![forbid(unsafe_code)]

//! Viewport-resize subscription.
//!
//! [`WindowResizeListener`] wraps an [`EventHub`] resize registration
//! with one behavioral addition: a leading invocation. With
//! `leading` enabled (the default) the callback runs once at attach
//! time with the current viewport extent, so consumers that derive
//! state from the viewport start correct instead of waiting for the
//! first real resize.

use sash_core::{EventHub, ListenerGuard};

/// Options for [`WindowResizeListener::attach`].
#[derive(Debug, Clone, Copy)]
pub struct ResizeOptions {
    /// Invoke the callback immediately at attach time with the current
    /// viewport extent. Defaults to `true`.
    pub leading: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self { leading: true }
    }
}

/// A scoped viewport-resize subscription.
///
/// Detaches from the hub when dropped.
#[derive(Debug)]
pub struct WindowResizeListener {
    _guard: ListenerGuard,
}

impl WindowResizeListener {
    /// Attach `callback` to `hub`'s resize events.
    ///
    /// The callback receives the viewport extent as `(width, height)`.
    #[must_use]
    pub fn attach(hub: &EventHub, options: ResizeOptions, callback: impl Fn(f64, f64) + 'static) -> Self {
        if options.leading {
            let (width, height) = hub.viewport();
            callback(width, height);
        }
        Self {
            _guard: hub.on_resize(callback),
        }
    }
}
