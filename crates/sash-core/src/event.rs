#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the event types dispatched through an
//! [`EventHub`](crate::hub::EventHub). All events derive `Clone` and
//! `PartialEq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are client-relative `f64` values with the origin at the
//!   top-left; positive x grows rightward, positive y grows downward.
//! - A pointer event carries no button or modifier detail: every helper
//!   in this workspace reacts to the primary-button gesture only, so the
//!   host decides which native events to translate.

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer event (down, move, or up).
    Pointer(PointerEvent),

    /// The host viewport was resized.
    Resize {
        /// New viewport width.
        width: f64,
        /// New viewport height.
        height: f64,
    },
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate (client-relative, leftmost edge is 0).
    pub x: f64,

    /// Y coordinate (client-relative, topmost edge is 0).
    pub y: f64,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    /// Create a pointer-down event (the common case in tests).
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    /// Create a pointer-move event.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Create a pointer-up event.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed down.
    Down,

    /// Pointer moved.
    Move,

    /// Pointer released.
    Up,
}

/// An axis of the viewport, used to pick one coordinate out of a
/// two-dimensional pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis: reads `x`.
    X,
    /// Vertical axis: reads `y`.
    Y,
}

impl Axis {
    /// The pointer coordinate along this axis.
    #[must_use]
    pub const fn of(self, event: &PointerEvent) -> f64 {
        match self {
            Self::X => event.x,
            Self::Y => event.y,
        }
    }

    /// The extent of a `(width, height)` pair along this axis.
    #[must_use]
    pub const fn extent_of(self, size: (f64, f64)) -> f64 {
        match self {
            Self::X => size.0,
            Self::Y => size.1,
        }
    }
}
