//! Selection handles, resize math and interaction state.

use crate::shapes::ShapeId;
use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};

/// A named control point on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    // Rectangle corners
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    // Line endpoints
    Start,
    End,
}

impl Handle {
    /// Short name used in UI and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Handle::TopLeft => "tl",
            Handle::TopRight => "tr",
            Handle::BottomLeft => "bl",
            Handle::BottomRight => "br",
            Handle::Start => "start",
            Handle::End => "end",
        }
    }

    /// Cursor shown while hovering or dragging this handle.
    pub fn cursor(self) -> CursorKind {
        match self {
            Handle::TopLeft | Handle::BottomRight | Handle::Start | Handle::End => {
                CursorKind::NwseResize
            }
            Handle::TopRight | Handle::BottomLeft => CursorKind::NeswResize,
        }
    }
}

/// Where a point falls on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// On a handle: the shape gets resized.
    Handle(Handle),
    /// On the body: the shape gets moved.
    Inside,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Handle(handle) => handle.as_str(),
            Position::Inside => "inside",
        }
    }

    pub fn cursor(self) -> CursorKind {
        match self {
            Position::Handle(handle) => handle.cursor(),
            Position::Inside => CursorKind::Move,
        }
    }
}

/// Pointer cursor hint for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorKind {
    #[default]
    Default,
    Move,
    /// Diagonal resize from top-left to bottom-right.
    NwseResize,
    /// Diagonal resize from top-right to bottom-left.
    NeswResize,
}

impl CursorKind {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorKind::Default => "default",
            CursorKind::Move => "move",
            CursorKind::NwseResize => "nwse-resize",
            CursorKind::NeswResize => "nesw-resize",
        }
    }
}

/// Cursor for an optional hit position.
pub fn cursor_for_position(position: Option<Position>) -> CursorKind {
    position.map_or(CursorKind::Default, Position::cursor)
}

/// New anchors after dragging `handle` of a shape with anchors `original`
/// to `point`. The opposite corner or endpoint stays put.
pub fn resized_coordinates(point: Point, handle: Handle, original: Line) -> Line {
    let (x, y) = (point.x, point.y);
    let (p0, p1) = (original.p0, original.p1);
    match handle {
        Handle::TopLeft | Handle::Start => Line::new((x, y), p1),
        Handle::TopRight => Line::new((p0.x, y), (x, p1.y)),
        Handle::BottomLeft => Line::new((x, p0.y), (p1.x, y)),
        Handle::BottomRight | Handle::End => Line::new(p0, (x, y)),
    }
}

/// Coarse interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    None,
    Drawing,
    Moving,
    Resizing,
}

/// The active pointer interaction and its local data.
///
/// This state is transient and never enters the history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// A freshly appended shape follows the pointer with its second anchor.
    Drawing { id: ShapeId },
    /// The shape follows the pointer, keeping the grab offset.
    Moving {
        id: ShapeId,
        /// Pointer minus first anchor at grab time.
        offset: Vec2,
        /// Anchors at grab time.
        origin: Line,
    },
    /// One handle follows the pointer.
    Resizing {
        id: ShapeId,
        handle: Handle,
        /// Anchors at grab time.
        origin: Line,
    },
}

impl Interaction {
    pub fn mode(&self) -> InteractionMode {
        match self {
            Interaction::Idle => InteractionMode::None,
            Interaction::Drawing { .. } => InteractionMode::Drawing,
            Interaction::Moving { .. } => InteractionMode::Moving,
            Interaction::Resizing { .. } => InteractionMode::Resizing,
        }
    }

    /// The shape being manipulated, if any.
    pub fn selected(&self) -> Option<ShapeId> {
        match *self {
            Interaction::Idle => None,
            Interaction::Drawing { id }
            | Interaction::Moving { id, .. }
            | Interaction::Resizing { id, .. } => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original() -> Line {
        Line::new((10.0, 10.0), (50.0, 40.0))
    }

    #[test]
    fn test_resize_top_left() {
        let resized = resized_coordinates(Point::new(0.0, 5.0), Handle::TopLeft, original());
        assert_eq!(resized, Line::new((0.0, 5.0), (50.0, 40.0)));
    }

    #[test]
    fn test_resize_top_right() {
        let resized = resized_coordinates(Point::new(60.0, 0.0), Handle::TopRight, original());
        assert_eq!(resized, Line::new((10.0, 0.0), (60.0, 40.0)));
    }

    #[test]
    fn test_resize_bottom_left() {
        let resized = resized_coordinates(Point::new(0.0, 70.0), Handle::BottomLeft, original());
        assert_eq!(resized, Line::new((0.0, 10.0), (50.0, 70.0)));
    }

    #[test]
    fn test_resize_line_endpoints() {
        let start = resized_coordinates(Point::new(1.0, 2.0), Handle::Start, original());
        assert_eq!(start, Line::new((1.0, 2.0), (50.0, 40.0)));
        let end = resized_coordinates(Point::new(3.0, 4.0), Handle::End, original());
        assert_eq!(end, Line::new((10.0, 10.0), (3.0, 4.0)));
    }

    #[test]
    fn test_cursor_lookup() {
        assert_eq!(Handle::TopLeft.cursor(), CursorKind::NwseResize);
        assert_eq!(Handle::End.cursor(), CursorKind::NwseResize);
        assert_eq!(Handle::BottomLeft.cursor(), CursorKind::NeswResize);
        assert_eq!(Position::Inside.cursor(), CursorKind::Move);
        assert_eq!(cursor_for_position(None), CursorKind::Default);
        assert_eq!(CursorKind::NeswResize.css_name(), "nesw-resize");
    }

    #[test]
    fn test_interaction_mode() {
        let moving = Interaction::Moving {
            id: 2,
            offset: Vec2::new(1.0, 1.0),
            origin: original(),
        };
        assert_eq!(moving.mode(), InteractionMode::Moving);
        assert_eq!(moving.selected(), Some(2));
        assert_eq!(Interaction::Idle.selected(), None);
        assert!(Interaction::default().is_idle());
    }
}
