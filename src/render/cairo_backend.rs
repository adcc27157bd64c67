use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GanttError, GanttResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers able to paint into a Cairo context owned by the host, such as a
/// toolkit draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> GanttResult<()>;
}

/// Cairo/Pango backend painting Gantt frames to an offscreen image surface or
/// to a borrowed context.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    font_family: String,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GanttResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GanttError::InvalidViewport {
                width: width.max(0).unsigned_abs(),
                height: height.max(0).unsigned_abs(),
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| backend_error("create image surface", err))?;
        Ok(Self {
            surface,
            background: Color::rgb(1.0, 1.0, 1.0),
            font_family: "Sans".to_owned(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) -> GanttResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn paint_frame(&mut self, context: &Context, frame: &RenderFrame) -> GanttResult<()> {
        frame.validate()?;

        set_source(context, self.background);
        context
            .paint()
            .map_err(|err| backend_error("clear background", err))?;

        let mut stats = CairoRenderStats::default();
        for rect in frame.rects() {
            fill_rect(context, rect)?;
            stats.rects_drawn += 1;
        }
        for line in frame.lines() {
            stroke_line(context, line)?;
            stats.lines_drawn += 1;
        }
        for text in frame.texts() {
            show_text(context, &self.font_family, text);
            stats.texts_drawn += 1;
        }

        tracing::trace!(
            rects = stats.rects_drawn,
            lines = stats.lines_drawn,
            texts = stats.texts_drawn,
            "cairo frame painted"
        );
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()> {
        let context =
            Context::new(&self.surface).map_err(|err| backend_error("create context", err))?;
        self.paint_frame(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GanttResult<()> {
        self.paint_frame(context, frame)
    }
}

fn set_source(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> GanttResult<()> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Ok(());
    }

    let radius = rect
        .corner_radius
        .min(rect.width / 2.0)
        .min(rect.height / 2.0);
    if radius > 0.0 {
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
        context.new_sub_path();
        context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
        context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
        context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
        context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
        context.close_path();
    } else {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
    }

    set_source(context, rect.fill_color);
    context
        .fill()
        .map_err(|err| backend_error("fill rect", err))
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> GanttResult<()> {
    set_source(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| backend_error("stroke line", err))
}

fn show_text(context: &Context, family: &str, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font = FontDescription::from_string(&format!("{family} {}px", text.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let (width, height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(width) / 2.0,
        TextHAlign::Right => text.x - f64::from(width),
    };
    let y = match text.v_align {
        TextVAlign::Top => text.y,
        TextVAlign::Middle => text.y - f64::from(height) / 2.0,
    };

    set_source(context, text.color);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn backend_error(action: &str, err: cairo::Error) -> GanttError {
    GanttError::InvalidData(format!("cairo failed to {action}: {err}"))
}
