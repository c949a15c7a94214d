#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, Rect};

/// Whether `pt` lies inside `rect`. Edges count as inside.
#[must_use]
pub fn contains(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x && pt.x <= rect.right() && pt.y >= rect.y && pt.y <= rect.bottom()
}

/// Offset from the rectangle's top-left corner to `pt`, if `pt` grabs the rectangle.
///
/// A drag keeps this offset constant so the grabbed point stays under the pointer.
#[must_use]
pub fn grab_offset(rect: Rect, pt: Point) -> Option<Point> {
    contains(rect, pt).then(|| Point::new(pt.x - rect.x, pt.y - rect.y))
}
