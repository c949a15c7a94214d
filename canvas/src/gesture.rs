//! Gesture-to-transform mapping.
//!
//! [`step`] is the single transition function for overlay interaction: it takes
//! the current transform and gesture memory plus one [`Input`] and returns the
//! next pair. It has no side effects, so every drag, wheel and pinch rule can be
//! checked in isolation.
//!
//! Rules:
//! - pointer/one-finger down inside the overlay (edges inclusive) starts a drag
//!   that keeps the grabbed point under the pointer; outside is a no-op
//! - wheel changes width by `dy * wheel_gain`
//! - two fingers pinch: width scales by the ratio of finger distance to the
//!   previous frame's distance
//! - every resize floors width at `min_width` and derives height from the
//!   asset aspect ratio; drags never touch the size

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::geom::Point;
use crate::hit;
use crate::input::{DragState, GestureState, Input};
use crate::scene::{AspectRatio, OverlayTransform};

/// Resize tunables, copied from the engine config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min_width: f64,
    pub wheel_gain: f64,
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub transform: OverlayTransform,
    pub gesture: GestureState,
}

/// Apply one input event.
#[must_use]
pub fn step(
    transform: OverlayTransform,
    gesture: GestureState,
    aspect: Option<AspectRatio>,
    input: Input<'_>,
    limits: Limits,
) -> Outcome {
    match input {
        Input::PointerDown(pt) => begin_drag(transform, gesture, pt),
        Input::PointerMove(pt) => drag_to(transform, gesture, pt),
        Input::PointerUp => Outcome {
            transform,
            gesture: GestureState { drag: DragState::Idle, ..gesture },
        },
        Input::Wheel(delta) => Outcome {
            transform: transform.resized(transform.width + delta.dy * limits.wheel_gain, aspect, limits.min_width),
            gesture,
        },
        Input::TouchStart(touches) => match touches {
            [one] => begin_drag(transform, gesture, *one),
            [a, b] => Outcome {
                transform,
                gesture: GestureState { pinch_distance: positive(a.distance(*b)), ..gesture },
            },
            _ => Outcome { transform, gesture },
        },
        Input::TouchMove(touches) => match (touches, gesture.pinch_distance) {
            ([one], _) => drag_to(transform, gesture, *one),
            ([a, b], Some(last)) => pinch(transform, gesture, aspect, a.distance(*b), last, limits),
            _ => Outcome { transform, gesture },
        },
        Input::TouchEnd(remaining) => {
            let mut gesture = gesture;
            if remaining.len() < 2 {
                gesture.pinch_distance = None;
            }
            if remaining.is_empty() {
                gesture.drag = DragState::Idle;
            }
            Outcome { transform, gesture }
        }
    }
}

fn begin_drag(transform: OverlayTransform, gesture: GestureState, pt: Point) -> Outcome {
    let Some(offset) = hit::grab_offset(transform.rect(), pt) else {
        return Outcome { transform, gesture };
    };
    Outcome {
        transform,
        gesture: GestureState { drag: DragState::Dragging { offset }, ..gesture },
    }
}

fn drag_to(transform: OverlayTransform, gesture: GestureState, pt: Point) -> Outcome {
    let DragState::Dragging { offset } = gesture.drag else {
        return Outcome { transform, gesture };
    };
    Outcome {
        transform: transform.moved_to(pt.x - offset.x, pt.y - offset.y),
        gesture,
    }
}

fn pinch(
    transform: OverlayTransform,
    gesture: GestureState,
    aspect: Option<AspectRatio>,
    distance: f64,
    last: f64,
    limits: Limits,
) -> Outcome {
    // Fingers on the same spot: no usable ratio, keep the previous distance.
    let Some(distance) = positive(distance) else {
        return Outcome { transform, gesture };
    };
    let scale = distance / last;
    Outcome {
        transform: transform.resized(transform.width * scale, aspect, limits.min_width),
        gesture: GestureState { pinch_distance: Some(distance), ..gesture },
    }
}

fn positive(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}
