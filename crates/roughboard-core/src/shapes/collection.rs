//! Ordered shape collection.

use super::{Shape, ShapeId, ShapeKind, ShapeStyle};
use crate::config::{BoardConfig, HitPrecedence};
use crate::error::{BoardError, BoardResult};
use crate::selection::Position;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

/// Result of hit-testing a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: ShapeId,
    pub position: Position,
}

/// Shapes in drawing order. A shape's id is its index.
///
/// Collections are treated as values: every edit returns a new collection
/// so that history snapshots stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeCollection {
    shapes: Vec<Shape>,
}

impl ShapeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    /// Id the next appended shape will get.
    pub fn next_id(&self) -> ShapeId {
        self.shapes.len()
    }

    /// A copy of this collection with a new shape appended.
    pub fn appended(&self, kind: ShapeKind, diagonal: Line, style: ShapeStyle) -> Self {
        let mut shapes = self.shapes.clone();
        shapes.push(Shape::new(self.next_id(), kind, diagonal, style));
        Self { shapes }
    }

    /// A copy of this collection with the shape at `id` rebuilt from the
    /// given geometry and style.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the collection. Ids only come from
    /// [`appended`](Self::appended), so this is a caller bug.
    pub fn updated(&self, id: ShapeId, kind: ShapeKind, diagonal: Line, style: ShapeStyle) -> Self {
        self.replaced(Shape::new(id, kind, diagonal, style))
    }

    /// Checked form of [`updated`](Self::updated).
    pub fn try_updated(
        &self,
        id: ShapeId,
        kind: ShapeKind,
        diagonal: Line,
        style: ShapeStyle,
    ) -> BoardResult<Self> {
        if id >= self.len() {
            return Err(BoardError::UnknownShape {
                id,
                len: self.len(),
            });
        }
        Ok(self.updated(id, kind, diagonal, style))
    }

    /// A copy of this collection with `shape` stored at its own id.
    ///
    /// # Panics
    ///
    /// Panics if the shape's id is not in the collection.
    pub fn replaced(&self, shape: Shape) -> Self {
        assert!(
            shape.id() < self.len(),
            "shape {} is out of bounds for a collection of {}",
            shape.id(),
            self.len()
        );
        let mut shapes = self.shapes.clone();
        let id = shape.id();
        shapes[id] = shape;
        Self { shapes }
    }

    /// The shape under `point` using the default tolerances and
    /// first-match precedence.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        self.hit_test_with(point, &BoardConfig::default())
    }

    /// The shape under `point` using the tolerances and precedence of
    /// `config`.
    pub fn hit_test_with(&self, point: Point, config: &BoardConfig) -> Option<Hit> {
        let hit = |shape: &Shape| {
            shape
                .position_within(point, config.tolerance)
                .map(|position| Hit {
                    id: shape.id(),
                    position,
                })
        };
        match config.hit_precedence {
            HitPrecedence::FirstMatch => self.shapes.iter().find_map(hit),
            HitPrecedence::TopMost => self.shapes.iter().rev().find_map(hit),
        }
    }

    /// Serialize to JSON. Sketches are not included.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON, checking ids and rebuilding sketches.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let mut collection: Self = serde_json::from_str(json)?;
        for (position, shape) in collection.shapes.iter_mut().enumerate() {
            if shape.id() != position {
                return Err(BoardError::MisplacedShape {
                    position,
                    id: shape.id(),
                });
            }
            shape.regenerate_sketch();
        }
        Ok(collection)
    }
}

impl<'a> IntoIterator for &'a ShapeCollection {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Handle;

    fn two_overlapping() -> ShapeCollection {
        ShapeCollection::new()
            .appended(
                ShapeKind::Rectangle,
                Line::new((0.0, 0.0), (100.0, 100.0)),
                ShapeStyle::default(),
            )
            .appended(
                ShapeKind::Rectangle,
                Line::new((50.0, 50.0), (150.0, 150.0)),
                ShapeStyle::default(),
            )
    }

    #[test]
    fn test_append_assigns_ids() {
        let shapes = two_overlapping();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes.get(0).map(Shape::id), Some(0));
        assert_eq!(shapes.get(1).map(Shape::id), Some(1));
        assert_eq!(shapes.next_id(), 2);
    }

    #[test]
    fn test_updated_leaves_original() {
        let shapes = two_overlapping();
        let moved = shapes.updated(
            0,
            ShapeKind::Rectangle,
            Line::new((200.0, 200.0), (210.0, 210.0)),
            ShapeStyle::default(),
        );
        assert_eq!(shapes.get(0).unwrap().start(), Point::new(0.0, 0.0));
        assert_eq!(moved.get(0).unwrap().start(), Point::new(200.0, 200.0));
        assert_eq!(moved.get(1), shapes.get(1));
    }

    #[test]
    #[should_panic]
    fn test_updated_out_of_bounds_panics() {
        ShapeCollection::new().updated(
            0,
            ShapeKind::Line,
            Line::new((0.0, 0.0), (1.0, 1.0)),
            ShapeStyle::default(),
        );
    }

    #[test]
    fn test_try_updated_out_of_bounds() {
        let result = two_overlapping().try_updated(
            5,
            ShapeKind::Line,
            Line::new((0.0, 0.0), (1.0, 1.0)),
            ShapeStyle::default(),
        );
        assert!(matches!(result, Err(BoardError::UnknownShape { id: 5, len: 2 })));
    }

    #[test]
    fn test_hit_test_first_match() {
        let shapes = two_overlapping();
        let hit = shapes.hit_test(Point::new(75.0, 75.0)).unwrap();
        assert_eq!(hit.id, 0);
        assert_eq!(hit.position, Position::Inside);
        assert_eq!(shapes.hit_test(Point::new(300.0, 300.0)), None);
    }

    #[test]
    fn test_hit_test_top_most() {
        let config = BoardConfig {
            hit_precedence: HitPrecedence::TopMost,
            ..BoardConfig::default()
        };
        let hit = two_overlapping()
            .hit_test_with(Point::new(75.0, 75.0), &config)
            .unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_hit_test_handle() {
        let hit = two_overlapping().hit_test(Point::new(150.0, 150.0)).unwrap();
        assert_eq!(hit.id, 1);
        assert_eq!(hit.position, Position::Handle(Handle::BottomRight));
    }

    #[test]
    fn test_json_roundtrip_rebuilds_sketch() {
        let shapes = two_overlapping();
        let json = shapes.to_json().unwrap();
        let restored = ShapeCollection::from_json(&json).unwrap();
        assert_eq!(restored, shapes);
    }

    #[test]
    fn test_json_rejects_misplaced_id() {
        let shapes = two_overlapping();
        let json = shapes.to_json().unwrap().replacen("\"id\":1", "\"id\":7", 1);
        assert!(matches!(
            ShapeCollection::from_json(&json),
            Err(BoardError::MisplacedShape { position: 1, id: 7 })
        ));
    }
}
