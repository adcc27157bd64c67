use crate::core::Viewport;
use crate::error::{GanttError, GanttResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// One bar as drawn: its rounded body plus whichever resize handles are
/// visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPrimitives {
    pub entry_index: usize,
    pub body: RectPrimitive,
    pub start_handle: Option<RectPrimitive>,
    pub end_handle: Option<RectPrimitive>,
}

impl BarPrimitives {
    #[must_use]
    pub fn new(entry_index: usize, body: RectPrimitive) -> Self {
        Self {
            entry_index,
            body,
            start_handle: None,
            end_handle: None,
        }
    }

    /// Body first, then the start and end handles painted over it.
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        std::iter::once(&self.body)
            .chain(self.start_handle.as_ref())
            .chain(self.end_handle.as_ref())
    }

    fn validate(&self) -> GanttResult<()> {
        self.rects().try_for_each(|rect| rect.validate())
    }
}

/// Axis line work (baseline and ticks) and its labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisPrimitives {
    pub lines: Vec<LinePrimitive>,
    pub labels: Vec<TextPrimitive>,
}

impl AxisPrimitives {
    fn validate(&self) -> GanttResult<()> {
        self.lines.iter().try_for_each(|line| line.validate())?;
        self.labels.iter().try_for_each(TextPrimitive::validate)
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty()
    }
}

/// Backend-agnostic draw pass for one Gantt chart frame.
///
/// Backends paint every rect (bars in entry order, each followed by its
/// handles), then the axis lines, then the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub bars: Vec<BarPrimitives>,
    pub time_axis: AxisPrimitives,
    pub lane_axis: AxisPrimitives,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            bars: Vec::new(),
            time_axis: AxisPrimitives::default(),
            lane_axis: AxisPrimitives::default(),
        }
    }

    /// Bar for `entry_index`, if that entry is drawn.
    #[must_use]
    pub fn bar(&self, entry_index: usize) -> Option<&BarPrimitives> {
        self.bars.iter().find(|bar| bar.entry_index == entry_index)
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.bars.iter().flat_map(|bar| bar.rects())
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.time_axis.lines.iter().chain(&self.lane_axis.lines)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.time_axis.labels.iter().chain(&self.lane_axis.labels)
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.rects().count()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.time_axis.lines.len() + self.lane_axis.lines.len()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.time_axis.labels.len() + self.lane_axis.labels.len()
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.bars.iter().try_for_each(BarPrimitives::validate)?;
        self.time_axis.validate()?;
        self.lane_axis.validate()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.time_axis.is_empty() && self.lane_axis.is_empty()
    }
}
