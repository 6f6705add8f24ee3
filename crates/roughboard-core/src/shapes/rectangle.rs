//! Rectangle geometry.

use crate::selection::Handle;
use kurbo::{Line, Point, Rect};

/// Corner handles in hit-test order.
///
/// Corners are named after the anchors they come from, not after where
/// they sit on screen, so a rectangle dragged up and to the left still
/// reports `TopLeft` at its first anchor.
pub(super) fn handles(diagonal: Line) -> [(Handle, Point); 4] {
    let (p0, p1) = (diagonal.p0, diagonal.p1);
    [
        (Handle::TopLeft, p0),
        (Handle::TopRight, Point::new(p1.x, p0.y)),
        (Handle::BottomLeft, Point::new(p0.x, p1.y)),
        (Handle::BottomRight, p1),
    ]
}

/// Inclusive containment in the normalized bounding box.
pub(super) fn contains(diagonal: Line, point: Point) -> bool {
    let rect = Rect::from_points(diagonal.p0, diagonal.p1);
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Order the corners so that `x1 <= x2` and `y1 <= y2`.
pub(super) fn normalize(diagonal: Line) -> Line {
    let rect = Rect::from_points(diagonal.p0, diagonal.p1);
    Line::new((rect.x0, rect.y0), (rect.x1, rect.y1))
}
