//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use roughboard_core::shapes::{ShapeCollection, ShapeId};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The shapes to paint, back to front.
    pub shapes: &'a ShapeCollection,
    /// Size of the drawing surface.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Shape whose handles are drawn.
    pub selected: Option<ShapeId>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(shapes: &'a ShapeCollection, viewport_size: Size) -> Self {
        Self {
            shapes,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            selected: None,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the shape whose handles are drawn.
    pub fn with_selection(mut self, selected: Option<ShapeId>) -> Self {
        self.selected = selected;
        self
    }

    /// Check that the viewport can be painted on.
    pub fn validate(&self) -> RenderResult<()> {
        let (width, height) = (self.viewport_size.width, self.viewport_size.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::InvalidViewport { width, height });
        }
        Ok(())
    }
}

/// Trait for rendering backends.
///
/// Every call paints a complete frame; whatever the previous frame drew is
/// replaced.
pub trait Renderer {
    /// Paint the frame described by `ctx`.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
