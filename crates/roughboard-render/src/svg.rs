//! SVG renderer.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use roughboard_core::shapes::{SerializableColor, Shape};
use roughboard_core::sketch::{Sketch, SketchFill};
use std::fmt::Write;

/// Side length of a selection handle square.
const HANDLE_SIZE: f64 = 8.0;

/// Paints each frame into a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
    frames: u64,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the last frame.
    pub fn svg(&self) -> &str {
        &self.output
    }

    pub fn into_svg(self) -> String {
        self.output
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        let (width, height) = (ctx.viewport_size.width, ctx.viewport_size.height);

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            css(self.background_color(ctx).into())
        )?;

        for shape in ctx.shapes {
            write_sketch(&mut out, shape.sketch())?;
        }

        if let Some(id) = ctx.selected {
            match ctx.shapes.get(id) {
                Some(shape) => write_handles(&mut out, shape, ctx.selection_color.into())?,
                None => log::warn!("Selected shape {} is not in the frame", id),
            }
        }

        out.push_str("</svg>\n");
        self.output = out;
        self.frames += 1;
        log::debug!("Rendered frame {} with {} shapes", self.frames, ctx.shapes.len());
        Ok(())
    }
}

fn css(color: SerializableColor) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        color.r,
        color.g,
        color.b,
        color.alpha()
    )
}

fn write_sketch(out: &mut String, sketch: &Sketch) -> std::fmt::Result {
    match &sketch.fill {
        SketchFill::None => {}
        SketchFill::Solid { color, area } => {
            writeln!(
                out,
                r#"  <path d="{}" fill="{}" stroke="none"/>"#,
                area.to_svg(),
                css(*color)
            )?;
        }
        SketchFill::Strokes { color, lines } => {
            writeln!(
                out,
                r#"  <g stroke="{}" stroke-width="{}" fill="none">"#,
                css(*color),
                sketch.stroke_width / 2.0
            )?;
            for line in lines {
                writeln!(
                    out,
                    r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
                    line.p0.x, line.p0.y, line.p1.x, line.p1.y
                )?;
            }
            writeln!(out, "  </g>")?;
        }
    }

    if !sketch.outline.elements().is_empty() {
        writeln!(
            out,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            sketch.outline.to_svg(),
            css(sketch.stroke_color),
            sketch.stroke_width
        )?;
    }
    Ok(())
}

fn write_handles(out: &mut String, shape: &Shape, color: SerializableColor) -> std::fmt::Result {
    for (handle, point) in shape.handles() {
        writeln!(
            out,
            r#"  <rect data-handle="{}" x="{:.2}" y="{:.2}" width="{HANDLE_SIZE}" height="{HANDLE_SIZE}" fill="white" stroke="{}"/>"#,
            handle.as_str(),
            point.x - HANDLE_SIZE / 2.0,
            point.y - HANDLE_SIZE / 2.0,
            css(color)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RendererError;
    use kurbo::{Line, Size};
    use roughboard_core::shapes::{FillPattern, ShapeCollection, ShapeKind, ShapeStyle, Sloppiness};

    fn viewport() -> Size {
        Size::new(640.0, 480.0)
    }

    fn rectangle(style: ShapeStyle) -> ShapeCollection {
        ShapeCollection::new().appended(
            ShapeKind::Rectangle,
            Line::new((10.0, 10.0), (50.0, 40.0)),
            style,
        )
    }

    #[test]
    fn test_empty_frame() {
        let shapes = ShapeCollection::new();
        let mut renderer = SvgRenderer::new();
        renderer.render(&RenderContext::new(&shapes, viewport())).unwrap();
        let svg = renderer.svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="640""#));
        assert!(svg.contains("rgba(255, 255, 255, 1.000)"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_solid_fill() {
        let shapes = rectangle(ShapeStyle {
            fill_pattern: FillPattern::Solid,
            ..ShapeStyle::default()
        });
        let mut renderer = SvgRenderer::new();
        renderer.render(&RenderContext::new(&shapes, viewport())).unwrap();
        assert!(renderer.svg().contains(r#"fill="rgba(255, 0, 0, 1.000)""#));
        assert!(!renderer.svg().contains("<line"));
    }

    #[test]
    fn test_rough_outline_is_curved() {
        let shapes = rectangle(ShapeStyle::default());
        let mut renderer = SvgRenderer::new();
        renderer.render(&RenderContext::new(&shapes, viewport())).unwrap();
        let outline = renderer
            .svg()
            .lines()
            .find(|line| line.contains(r#"fill="none" stroke="rgba(0, 0, 0, 1.000)""#))
            .unwrap();
        assert!(outline.contains('Q'));

        let clean = rectangle(ShapeStyle {
            sloppiness: Sloppiness::Architect,
            ..ShapeStyle::default()
        });
        renderer.render(&RenderContext::new(&clean, viewport())).unwrap();
        assert!(!renderer.svg().contains('Q'));
    }

    #[test]
    fn test_hachure_fill() {
        let shapes = rectangle(ShapeStyle::default());
        let mut renderer = SvgRenderer::new();
        renderer.render(&RenderContext::new(&shapes, viewport())).unwrap();
        assert!(renderer.svg().contains("<line"));
        assert!(renderer.svg().contains(r#"stroke="rgba(255, 0, 0, 1.000)""#));
    }

    #[test]
    fn test_frames_replace_output() {
        let shapes = rectangle(ShapeStyle::default());
        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::new(&shapes, viewport());
        renderer.render(&ctx).unwrap();
        renderer.render(&ctx).unwrap();
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.svg().matches("<svg").count(), 1);
    }

    #[test]
    fn test_invalid_viewport_keeps_previous_frame() {
        let shapes = ShapeCollection::new();
        let mut renderer = SvgRenderer::new();
        renderer.render(&RenderContext::new(&shapes, viewport())).unwrap();
        let previous = renderer.svg().to_string();

        let result = renderer.render(&RenderContext::new(&shapes, Size::new(-1.0, 10.0)));
        assert!(matches!(result, Err(RendererError::InvalidViewport { .. })));
        assert_eq!(renderer.svg(), previous);
    }

    #[test]
    fn test_selection_handles() {
        let shapes = rectangle(ShapeStyle::default());
        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::new(&shapes, viewport()).with_selection(Some(0));
        renderer.render(&ctx).unwrap();
        for name in ["tl", "tr", "bl", "br"] {
            assert!(renderer.svg().contains(&format!(r#"data-handle="{name}""#)));
        }
    }

    #[test]
    fn test_zero_length_line_draws_nothing() {
        let shapes = ShapeCollection::new().appended(
            ShapeKind::Line,
            Line::new((5.0, 5.0), (5.0, 5.0)),
            ShapeStyle::default(),
        );
        let mut renderer = SvgRenderer::new();
        renderer.render(&RenderContext::new(&shapes, viewport())).unwrap();
        assert!(!renderer.svg().contains("<path"));
    }
}
