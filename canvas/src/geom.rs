//! Geometry primitives shared by the gesture, hit-test and render layers.
//!
//! All engine state lives in *surface* coordinates: pixels of the fixed-size
//! drawing surface, origin at its top-left corner. Raw browser events arrive in
//! *client* coordinates and are mapped through [`ClientBounds::to_surface`].

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either client or surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Pixel dimensions of the drawing surface. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// On-screen bounding box of the drawing surface, as reported by the host layout
/// (`getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientBounds {
    /// Convert a client-space point to surface pixels.
    ///
    /// The element may be laid out at a CSS size different from its pixel size,
    /// so the offset from the box origin is scaled per axis. A zero-sized box
    /// (element hidden or not yet laid out) maps by offset alone.
    #[must_use]
    pub fn to_surface(&self, client: Point, surface: Surface) -> Point {
        let sx = if self.width > 0.0 { f64::from(surface.width) / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { f64::from(surface.height) / self.height } else { 1.0 };
        Point {
            x: (client.x - self.left) * sx,
            y: (client.y - self.top) * sy,
        }
    }
}
