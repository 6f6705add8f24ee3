//! Roughboard Render Library
//!
//! Renderer abstraction for Roughboard and an SVG implementation that
//! paints shape sketches into a standalone document.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
