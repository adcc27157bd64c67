use crate::error::GanttResult;
use crate::render::Renderer;

use super::engine_core::EngineCore;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `GanttEngine` coordinates the entry store, time-domain policy, scales,
/// drag gestures, the retained scene and renderer calls. Pointer input is in
/// surface coordinates; the engine removes the margin itself.
pub struct GanttEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> GanttEngine<R> {
    /// Materializes the scene at the current animation clock and hands it to
    /// the renderer.
    pub fn render(&mut self) -> GanttResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context, e.g. from a toolkit
    /// draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> GanttResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
