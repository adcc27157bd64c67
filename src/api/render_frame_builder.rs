use crate::core::TimeScale;
use crate::error::GanttResult;
use crate::render::{
    AxisPrimitives, BarPrimitives, Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TextVAlign,
};
use crate::scene::HandleElement;

use super::GanttEngine;

pub const BAR_CORNER_RADIUS_PX: f64 = 5.0;
/// Fill opacity of the black resize handles.
pub const HANDLE_FILL_ALPHA: f64 = 0.2;
pub const AXIS_TICK_SIZE_PX: f64 = 8.0;
/// Gap between a tick's end and its label.
pub const AXIS_TICK_PADDING_PX: f64 = 8.0;
/// Gap between the lane axis line and the right edge of lane labels.
pub const LANE_LABEL_PADDING_PX: f64 = 3.0;
pub const AXIS_FONT_SIZE_PX: f64 = 10.0;

const AXIS_STROKE_WIDTH_PX: f64 = 1.0;
const AXIS_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);

impl<R: Renderer> GanttEngine<R> {
    /// Materializes the scene at the current animation clock.
    pub fn build_render_frame(&self) -> GanttResult<RenderFrame> {
        self.build_render_frame_at(self.core.scene.clock_ms())
    }

    /// Materializes the scene as displayed at `clock_ms`, sampling in-flight
    /// bar and axis transitions. Everything is translated by the margin.
    pub fn build_render_frame_at(&self, clock_ms: f64) -> GanttResult<RenderFrame> {
        let scene = &self.core.scene;
        let margin = self.core.layout.margin;
        let (origin_x, origin_y) = (margin.left, margin.top);
        let mut frame = RenderFrame::new(self.core.layout.surface);

        let handle_color = Color::rgba(0.0, 0.0, 0.0, HANDLE_FILL_ALPHA);
        for bar in scene.bars() {
            let geometry = bar.displayed_geometry(clock_ms);
            let mut primitives = BarPrimitives::new(
                bar.entry_index,
                RectPrimitive::new(
                    origin_x + geometry.x,
                    origin_y + geometry.y,
                    geometry.width,
                    geometry.height,
                    Color::from(bar.color),
                )
                .with_corner_radius(BAR_CORNER_RADIUS_PX),
            );

            let handle_rect = |handle: HandleElement, shift: f64| {
                handle.visible.then(|| {
                    RectPrimitive::new(
                        origin_x + geometry.x + handle.offset_x + shift,
                        origin_y + geometry.y,
                        handle.width,
                        geometry.height,
                        handle_color,
                    )
                    .with_corner_radius(BAR_CORNER_RADIUS_PX)
                })
            };
            primitives.start_handle = handle_rect(bar.start_handle, 0.0);
            // The end handle follows the displayed width while the bar animates.
            primitives.end_handle = handle_rect(bar.end_handle, geometry.width - bar.geometry.width);
            frame.bars.push(primitives);
        }

        frame.time_axis = self.time_axis_primitives(clock_ms, origin_x, origin_y)?;
        frame.lane_axis = self.lane_axis_primitives(origin_x, origin_y);
        Ok(frame)
    }

    fn time_axis_primitives(
        &self,
        clock_ms: f64,
        origin_x: f64,
        origin_y: f64,
    ) -> GanttResult<AxisPrimitives> {
        let scene = &self.core.scene;
        let axis = scene.time_axis();
        let plot_width = self.core.time_scale.width();
        let baseline_y = origin_y + axis.baseline_y;
        let mut primitives = AxisPrimitives::default();

        primitives.lines.push(LinePrimitive::new(
            origin_x,
            baseline_y,
            origin_x + plot_width,
            baseline_y,
            AXIS_STROKE_WIDTH_PX,
            AXIS_COLOR,
        ));

        // Ticks are placed against the domain the axis currently shows.
        let displayed = match scene.displayed_axis_domain(clock_ms)? {
            Some(domain) => Some(TimeScale::new(domain, plot_width)?),
            None => None,
        };
        for tick in &axis.ticks {
            let x = match displayed {
                Some(scale) if !scale.domain().contains(tick.time) => continue,
                Some(scale) => scale.time_to_pixel(tick.time),
                None => tick.x,
            };
            let x = origin_x + x;
            primitives.lines.push(LinePrimitive::new(
                x,
                baseline_y,
                x,
                baseline_y + AXIS_TICK_SIZE_PX,
                AXIS_STROKE_WIDTH_PX,
                AXIS_COLOR,
            ));
            if !tick.label.is_empty() {
                primitives.labels.push(TextPrimitive::new(
                    tick.label.clone(),
                    x,
                    baseline_y + AXIS_TICK_SIZE_PX + AXIS_TICK_PADDING_PX,
                    AXIS_FONT_SIZE_PX,
                    AXIS_COLOR,
                    TextHAlign::Center,
                ));
            }
        }
        Ok(primitives)
    }

    fn lane_axis_primitives(&self, origin_x: f64, origin_y: f64) -> AxisPrimitives {
        let axis = self.core.scene.lane_axis();
        let mut primitives = AxisPrimitives::default();
        primitives.lines.push(LinePrimitive::new(
            origin_x,
            origin_y,
            origin_x,
            origin_y + axis.height,
            AXIS_STROKE_WIDTH_PX,
            AXIS_COLOR,
        ));

        for label in &axis.labels {
            if label.category.is_empty() {
                continue;
            }
            primitives.labels.push(
                TextPrimitive::new(
                    label.category.clone(),
                    origin_x - LANE_LABEL_PADDING_PX,
                    origin_y + label.y_center,
                    AXIS_FONT_SIZE_PX,
                    AXIS_COLOR,
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
        primitives
    }
}
