//! Sketch descriptors: the drawing instructions a renderer needs for a shape.
//!
//! A sketch is derived from geometry, style and a seed only. It is rebuilt
//! every time a shape is created or replaced, so renderers never have to
//! look at the style themselves.
//!
//! Outlines get a hand-drawn look in the manner of rough.js: every segment
//! is drawn twice, each pass with slightly offset endpoints and a bowed
//! middle. The randomness comes from the seed, so the same shape always
//! sketches the same way.

use crate::shapes::{FillPattern, SerializableColor, ShapeKind, ShapeStyle};
use kurbo::{BezPath, Line, PathSeg, Point, Rect, Shape as KurboShape, Vec2};

/// Upper bound on hachure strokes generated for one fill direction.
const MAX_HACHURE_STROKES: i64 = 4096;

/// Largest endpoint offset at roughness 1, per axis.
const MAX_RANDOMNESS_OFFSET: f64 = 2.0;

/// Passes drawn over every outline segment.
const OUTLINE_PASSES: u32 = 2;

/// How the inside of a shape is painted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SketchFill {
    #[default]
    None,
    /// `area` is the exact outline to fill.
    Solid {
        color: SerializableColor,
        area: BezPath,
    },
    /// Individual strokes clipped to the shape.
    Strokes {
        color: SerializableColor,
        lines: Vec<Line>,
    },
}

/// Render descriptor for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Sketch {
    pub outline: BezPath,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    pub fill: SketchFill,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            outline: BezPath::new(),
            stroke_color: SerializableColor::BLACK,
            stroke_width: 1.0,
            fill: SketchFill::None,
        }
    }
}

impl Sketch {
    /// Build the sketch for a shape. `seed` drives the hand-drawn effect.
    pub fn generate(kind: ShapeKind, diagonal: Line, style: &ShapeStyle, seed: u32) -> Self {
        let roughness = style.sloppiness.roughness();
        let (clean, fill) = match kind {
            ShapeKind::Line => (line_path(diagonal), SketchFill::None),
            ShapeKind::Rectangle => {
                let rect = Rect::from_points(diagonal.p0, diagonal.p1);
                let path = rect.to_path(0.1);
                let fill = rectangle_fill(rect, &path, style, roughness, seed);
                (path, fill)
            }
        };
        Self {
            outline: roughen(&clean, roughness, seed),
            stroke_color: style.stroke_color,
            stroke_width: style.stroke_width,
            fill,
        }
    }
}

/// Seeded xorshift32, enough for deterministic jitter.
struct SketchRng {
    state: u32,
}

impl SketchRng {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[-amount, amount]`.
    fn offset(&mut self, amount: f64) -> f64 {
        (f64::from(self.next_u32()) / f64::from(u32::MAX) * 2.0 - 1.0) * amount
    }

    fn jitter(&mut self, point: Point, amount: f64) -> Point {
        Point::new(point.x + self.offset(amount), point.y + self.offset(amount))
    }
}

/// Distinct random sequence for each pass over the same shape.
fn pass_seed(seed: u32, pass: u32) -> u32 {
    seed.wrapping_add(pass.wrapping_mul(99991))
}

fn line_path(diagonal: Line) -> BezPath {
    let mut path = BezPath::new();
    if diagonal.p0 == diagonal.p1 {
        return path;
    }
    path.move_to(diagonal.p0);
    path.line_to(diagonal.p1);
    path
}

/// Redraw every straight segment of `clean` as bowed, overshooting
/// strokes. Roughness 0 returns the clean path.
fn roughen(clean: &BezPath, roughness: f64, seed: u32) -> BezPath {
    if roughness <= 0.0 {
        return clean.clone();
    }
    let max_offset = roughness * MAX_RANDOMNESS_OFFSET;
    let mut path = BezPath::new();
    for pass in 0..OUTLINE_PASSES {
        let mut rng = SketchRng::new(pass_seed(seed, pass));
        for segment in clean.segments() {
            let PathSeg::Line(line) = segment else {
                continue;
            };
            let delta = line.p1 - line.p0;
            let len = delta.hypot();
            if len < f64::EPSILON {
                continue;
            }
            let normal = Vec2::new(-delta.y, delta.x) / len;
            let bow = rng.offset(roughness * roughness * len / 200.0);
            let control = line.p0.midpoint(line.p1) + normal * bow;
            path.move_to(rng.jitter(line.p0, max_offset));
            path.quad_to(control, rng.jitter(line.p1, max_offset));
        }
    }
    path
}

fn rectangle_fill(
    rect: Rect,
    area: &BezPath,
    style: &ShapeStyle,
    roughness: f64,
    seed: u32,
) -> SketchFill {
    let Some(color) = style.fill_color else {
        return SketchFill::None;
    };
    let mut lines = match style.fill_pattern {
        FillPattern::Solid => {
            return SketchFill::Solid {
                color,
                area: area.clone(),
            };
        }
        FillPattern::Hachure => hachure(rect, style.hachure_angle, style.hachure_gap),
        FillPattern::CrossHatch => {
            let mut lines = hachure(rect, style.hachure_angle, style.hachure_gap);
            lines.extend(hachure(rect, style.hachure_angle + 90.0, style.hachure_gap));
            lines
        }
    };
    if roughness > 0.0 {
        // Hachure strokes wobble half as much as the outline.
        let amount = roughness * MAX_RANDOMNESS_OFFSET / 2.0;
        let mut rng = SketchRng::new(pass_seed(seed, OUTLINE_PASSES));
        for line in &mut lines {
            *line = Line::new(rng.jitter(line.p0, amount), rng.jitter(line.p1, amount));
        }
    }
    SketchFill::Strokes { color, lines }
}

/// Parallel strokes `gap` apart at `angle` degrees, clipped to `rect`.
///
/// Strokes are laid out symmetrically around the rectangle's center. When
/// `gap` would need more than [`MAX_HACHURE_STROKES`] strokes the gap is
/// widened so the strokes still span the whole rectangle.
pub fn hachure(rect: Rect, angle: f64, gap: f64) -> Vec<Line> {
    if !gap.is_finite() || gap <= 0.0 || rect.area() <= 0.0 {
        return Vec::new();
    }
    let theta = angle.to_radians();
    let dir = Vec2::new(theta.cos(), theta.sin());
    let normal = Vec2::new(-dir.y, dir.x);
    let center = rect.center();
    let reach = (rect.width() * normal.x.abs() + rect.height() * normal.y.abs()) / 2.0;
    let gap = gap.max(2.0 * reach / MAX_HACHURE_STROKES as f64);
    let count = ((reach / gap).floor() as i64).min(MAX_HACHURE_STROKES / 2);

    (-count..=count)
        .filter_map(|k| clip(rect, center + normal * (k as f64 * gap), dir))
        .collect()
}

/// Clip the infinite line through `origin` along `dir` to `rect`.
fn clip(rect: Rect, origin: Point, dir: Vec2) -> Option<Line> {
    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;
    for (o, d, lo, hi) in [
        (origin.x, dir.x, rect.x0, rect.x1),
        (origin.y, dir.y, rect.y0, rect.y1),
    ] {
        if d.abs() < f64::EPSILON {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let a = (lo - o) / d;
            let b = (hi - o) / d;
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
        }
    }
    (t_max - t_min > f64::EPSILON).then(|| Line::new(origin + dir * t_min, origin + dir * t_max))
}
