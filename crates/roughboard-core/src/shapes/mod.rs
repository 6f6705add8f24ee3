//! Shape definitions for the whiteboard.

mod collection;
mod line;
mod rectangle;

pub use collection::{Hit, ShapeCollection};

use crate::config::HitTolerance;
use crate::selection::{Handle, Position};
use crate::sketch::Sketch;
use kurbo::{Line, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    pub const GREEN: Self = Self::new(0, 128, 0, 255);
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// How a filled rectangle is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillPattern {
    /// Solid fill color.
    Solid,
    /// Parallel sketched strokes.
    #[default]
    Hachure,
    /// Two sets of hachure strokes at right angles.
    CrossHatch,
}

/// How far sketched strokes wander from the exact geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sloppiness {
    /// Clean, precise lines (roughness 0).
    Architect,
    /// Slight hand-drawn wobble (roughness 1).
    #[default]
    Artist,
    /// Very sketchy (roughness 2).
    Cartoonist,
}

impl Sloppiness {
    /// Roughness factor handed to the sketch generator.
    pub fn roughness(&self) -> f64 {
        match self {
            Sloppiness::Architect => 0.0,
            Sloppiness::Artist => 1.0,
            Sloppiness::Cartoonist => 2.0,
        }
    }
}

fn default_hachure_angle() -> f64 {
    60.0
}

fn default_hachure_gap() -> f64 {
    10.0
}

/// Style properties for shapes.
///
/// The geometry code never looks at the style; it is handed through to the
/// sketch generator and from there to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill). Lines are never filled.
    pub fill_color: Option<SerializableColor>,
    /// Fill pattern style.
    #[serde(default)]
    pub fill_pattern: FillPattern,
    /// Angle of hachure strokes in degrees.
    #[serde(default = "default_hachure_angle")]
    pub hachure_angle: f64,
    /// Distance between hachure strokes.
    #[serde(default = "default_hachure_gap")]
    pub hachure_gap: f64,
    /// Sloppiness level for the hand-drawn effect.
    #[serde(default)]
    pub sloppiness: Sloppiness,
    /// Base seed for the hand-drawn effect. Each shape mixes in its id, so
    /// its strokes stay the same while it is moved or resized.
    #[serde(default)]
    pub seed: u32,
}

impl ShapeStyle {
    /// Same style with another fill color.
    pub fn with_fill(mut self, color: SerializableColor) -> Self {
        self.fill_color = Some(color);
        self
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::BLACK,
            stroke_width: 1.0,
            fill_color: Some(SerializableColor::RED),
            fill_pattern: FillPattern::default(),
            hachure_angle: default_hachure_angle(),
            hachure_gap: default_hachure_gap(),
            sloppiness: Sloppiness::default(),
            seed: 0,
        }
    }
}

/// Identifier for shapes: the shape's index in its collection.
pub type ShapeId = usize;

/// The kinds of shape the board can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
}

/// A line or rectangle with identity, geometry and style.
///
/// The geometry is the shape's diagonal: the endpoints of a line or two
/// opposite corners of a rectangle. The corners are not ordered while a
/// drag is in progress; [`Shape::normalized`] orders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    diagonal: Line,
    style: ShapeStyle,
    /// Rebuilt from geometry and style, never stored.
    #[serde(skip)]
    sketch: Sketch,
}

impl Shape {
    /// Create a shape and its sketch. Degenerate geometry is allowed.
    pub fn new(id: ShapeId, kind: ShapeKind, diagonal: Line, style: ShapeStyle) -> Self {
        let sketch = Sketch::generate(kind, diagonal, &style, sketch_seed(id, style.seed));
        Self {
            id,
            kind,
            diagonal,
            style,
            sketch,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn diagonal(&self) -> Line {
        self.diagonal
    }

    /// First anchor, `(x1, y1)`.
    pub fn start(&self) -> Point {
        self.diagonal.p0
    }

    /// Second anchor, `(x2, y2)`.
    pub fn end(&self) -> Point {
        self.diagonal.p1
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.diagonal.p0, self.diagonal.p1)
    }

    /// The same shape with new geometry.
    pub fn with_diagonal(&self, diagonal: Line) -> Self {
        Self::new(self.id, self.kind, diagonal, self.style.clone())
    }

    /// Named handles and their positions, in hit-test order.
    pub fn handles(&self) -> Vec<(Handle, Point)> {
        match self.kind {
            ShapeKind::Rectangle => rectangle::handles(self.diagonal).to_vec(),
            ShapeKind::Line => line::handles(self.diagonal).to_vec(),
        }
    }

    /// Where `point` falls on this shape, if anywhere.
    ///
    /// Handles win over the interior.
    pub fn position_within(&self, point: Point, tolerance: HitTolerance) -> Option<Position> {
        let handle = self
            .handles()
            .into_iter()
            .find(|&(_, anchor)| near_point(point, anchor, tolerance.handle));
        if let Some((handle, _)) = handle {
            return Some(Position::Handle(handle));
        }

        let inside = match self.kind {
            ShapeKind::Rectangle => rectangle::contains(self.diagonal, point),
            ShapeKind::Line => line::contains(self.diagonal, point, tolerance.line_slack),
        };
        inside.then_some(Position::Inside)
    }

    /// The shape with its anchors in canonical order.
    pub fn normalized(&self) -> Self {
        let diagonal = match self.kind {
            ShapeKind::Rectangle => rectangle::normalize(self.diagonal),
            ShapeKind::Line => line::normalize(self.diagonal),
        };
        self.with_diagonal(diagonal)
    }

    /// Rebuild the sketch after deserialization.
    pub(crate) fn regenerate_sketch(&mut self) {
        self.sketch = Sketch::generate(
            self.kind,
            self.diagonal,
            &self.style,
            sketch_seed(self.id, self.style.seed),
        );
    }
}

/// Per-shape seed: the style seed mixed with the shape id (splitmix32).
fn sketch_seed(id: ShapeId, seed: u32) -> u32 {
    let mut x = seed.wrapping_add((id as u32).wrapping_mul(0x9E37_79B9));
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}

/// Chebyshev proximity: both axis distances strictly below `tolerance`.
fn near_point(point: Point, anchor: Point, tolerance: f64) -> bool {
    (point.x - anchor.x).abs() < tolerance && (point.y - anchor.y).abs() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
        Shape::new(
            0,
            ShapeKind::Rectangle,
            Line::new((x1, y1), (x2, y2)),
            ShapeStyle::default(),
        )
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
        Shape::new(
            0,
            ShapeKind::Line,
            Line::new((x1, y1), (x2, y2)),
            ShapeStyle::default(),
        )
    }

    fn position(shape: &Shape, x: f64, y: f64) -> Option<Position> {
        shape.position_within(Point::new(x, y), HitTolerance::default())
    }

    #[test]
    fn test_rectangle_corners() {
        let shape = rect(10.0, 10.0, 50.0, 40.0);
        assert_eq!(position(&shape, 10.0, 10.0), Some(Position::Handle(Handle::TopLeft)));
        assert_eq!(position(&shape, 49.0, 11.0), Some(Position::Handle(Handle::TopRight)));
        assert_eq!(position(&shape, 12.0, 38.0), Some(Position::Handle(Handle::BottomLeft)));
        assert_eq!(position(&shape, 54.9, 44.9), Some(Position::Handle(Handle::BottomRight)));
    }

    #[test]
    fn test_rectangle_inside_and_outside() {
        let shape = rect(10.0, 10.0, 50.0, 40.0);
        assert_eq!(position(&shape, 30.0, 20.0), Some(Position::Inside));
        assert_eq!(position(&shape, 50.0, 25.0), Some(Position::Inside));
        assert_eq!(position(&shape, 60.0, 25.0), None);
        // Exactly at the tolerance is not near.
        assert_eq!(position(&shape, 5.0, 10.0), None);
    }

    #[test]
    fn test_reversed_rectangle_inside() {
        let shape = rect(50.0, 40.0, 10.0, 10.0);
        assert_eq!(position(&shape, 30.0, 20.0), Some(Position::Inside));
        assert_eq!(position(&shape, 50.0, 40.0), Some(Position::Handle(Handle::TopLeft)));
    }

    #[test]
    fn test_line_positions() {
        let shape = line(0.0, 0.0, 10.0, 0.0);
        assert_eq!(position(&shape, 5.0, 0.4), Some(Position::Inside));
        assert_eq!(position(&shape, 5.0, 5.0), None);
        assert_eq!(position(&shape, 1.0, 1.0), Some(Position::Handle(Handle::Start)));
        assert_eq!(position(&shape, 9.0, -1.0), Some(Position::Handle(Handle::End)));
        assert_eq!(position(&shape, 20.0, 0.0), None);
    }

    #[test]
    fn test_normalize_rectangle() {
        let shape = rect(50.0, 10.0, 10.0, 40.0).normalized();
        assert_eq!(shape.diagonal(), Line::new((10.0, 10.0), (50.0, 40.0)));
    }

    #[test]
    fn test_normalize_line() {
        let shape = line(10.0, 5.0, 0.0, 0.0).normalized();
        assert_eq!(shape.start(), Point::new(0.0, 0.0));
        assert_eq!(shape.end(), Point::new(10.0, 5.0));

        let vertical = line(3.0, 9.0, 3.0, 1.0).normalized();
        assert_eq!(vertical.start(), Point::new(3.0, 1.0));

        let already = line(0.0, 0.0, 10.0, -5.0);
        assert_eq!(already.normalized(), already);
    }

    #[test]
    fn test_with_diagonal_keeps_identity() {
        let shape = Shape::new(
            3,
            ShapeKind::Rectangle,
            Line::new((0.0, 0.0), (1.0, 1.0)),
            ShapeStyle::default().with_fill(SerializableColor::BLUE),
        );
        let moved = shape.with_diagonal(Line::new((5.0, 5.0), (9.0, 9.0)));
        assert_eq!(moved.id(), 3);
        assert_eq!(moved.kind(), ShapeKind::Rectangle);
        assert_eq!(moved.style().fill_color, Some(SerializableColor::BLUE));
        assert_ne!(moved.sketch(), shape.sketch());
    }

    #[test]
    fn test_color_conversion() {
        let color: Color = SerializableColor::GREEN.into();
        assert_eq!(SerializableColor::from(color), SerializableColor::GREEN);
    }

    #[test]
    fn test_sketch_stable_across_moves() {
        let shape = rect(0.0, 0.0, 40.0, 30.0);
        let moved = shape
            .with_diagonal(Line::new((100.0, 100.0), (140.0, 130.0)))
            .with_diagonal(Line::new((0.0, 0.0), (40.0, 30.0)));
        assert_eq!(moved.sketch(), shape.sketch());
    }

    #[test]
    fn test_sketch_seed_differs_per_shape() {
        assert_ne!(sketch_seed(0, 0), sketch_seed(1, 0));
        assert_ne!(sketch_seed(0, 0), sketch_seed(0, 1));
        assert_eq!(sketch_seed(4, 7), sketch_seed(4, 7));
    }

    #[test]
    fn test_style_json_defaults_sloppiness() {
        let json = r#"{"stroke_color":{"r":0,"g":0,"b":0,"a":255},"stroke_width":1.0,"fill_color":null}"#;
        let style: ShapeStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.sloppiness, Sloppiness::Artist);
        assert_eq!(style.seed, 0);
        assert_eq!(style.sloppiness.roughness(), 1.0);
    }
}
