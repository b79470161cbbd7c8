mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PolygonPrimitive, RectPrimitive, TextHAlign, TextOrientation,
    TextPrimitive,
};
pub use svg_renderer::{SvgRenderStats, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from plot specs and container lifecycle.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
