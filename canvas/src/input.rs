//! Input model: raw gesture events and the transient gesture state.
//!
//! `Input` is one already-normalised event in surface coordinates. Touch events
//! carry every point currently on the surface (the browser's `touches` list),
//! not just the ones that changed. `GestureState` is what the engine remembers
//! between events of one pointer or touch sequence; it is cleared when the
//! sequence ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// One input event, positions already in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Wheel(WheelDelta),
    /// Points on the surface after a finger landed.
    TouchStart(&'a [Point]),
    /// Points on the surface after fingers moved.
    TouchMove(&'a [Point]),
    /// Points still on the surface after a finger lifted.
    TouchEnd(&'a [Point]),
}

impl Input<'_> {
    /// Whether the browser's default handling (page scroll, native zoom) must be
    /// suppressed for this event.
    #[must_use]
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::Wheel(_) | Self::TouchStart(_) | Self::TouchMove(_) | Self::TouchEnd(_))
    }
}

/// Whether a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag; waiting for a pointer-down on the overlay.
    #[default]
    Idle,
    /// The overlay follows the pointer.
    Dragging {
        /// Pointer position minus overlay top-left at drag start.
        offset: Point,
    },
}

/// Transient gesture memory. Not part of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub drag: DragState,
    /// Distance between two touch points on the previous pinch frame. Always
    /// positive when set.
    pub pinch_distance: Option<f64>,
}

impl GestureState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }
}
