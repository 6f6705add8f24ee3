//! Line segment geometry.

use crate::selection::Handle;
use kurbo::{Line, Point};

/// Endpoint handles in hit-test order.
pub(super) fn handles(diagonal: Line) -> [(Handle, Point); 2] {
    [(Handle::Start, diagonal.p0), (Handle::End, diagonal.p1)]
}

/// A point is on the segment when going through it is at most `slack`
/// longer than going straight from start to end.
pub(super) fn contains(diagonal: Line, point: Point, slack: f64) -> bool {
    let (p0, p1) = (diagonal.p0, diagonal.p1);
    let detour = p0.distance(point) + p1.distance(point);
    (p0.distance(p1) - detour).abs() < slack
}

/// Order the endpoints so the start is lexicographically smaller.
pub(super) fn normalize(diagonal: Line) -> Line {
    let (p0, p1) = (diagonal.p0, diagonal.p1);
    if p0.x < p1.x || (p0.x == p1.x && p0.y < p1.y) {
        diagonal
    } else {
        Line::new(p1, p0)
    }
}
