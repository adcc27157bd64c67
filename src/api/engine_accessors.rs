use chrono::{DateTime, Utc};

use crate::core::{
    CategorySource, LaneScale, Margin, TimeDomain, TimeDomainMode, TimeScale, Viewport, WorkEntry,
};
use crate::error::GanttResult;
use crate::render::Renderer;
use crate::scene::{Scene, validate_tick_format};

use super::GanttEngine;
use super::validation::{
    validate_context_menu_items, validate_handle_width, validate_height, validate_plot_width,
};

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn surface(&self) -> Viewport {
        self.core.layout.surface
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.core.layout.margin
    }

    /// Takes effect for pointer routing immediately and for layout on the
    /// next redraw.
    pub fn set_margin(&mut self, margin: Margin) -> GanttResult<()> {
        self.core.layout.margin = margin.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn tick_format(&self) -> &str {
        &self.core.layout.tick_format
    }

    pub fn set_tick_format(&mut self, tick_format: impl Into<String>) -> GanttResult<()> {
        let tick_format = tick_format.into();
        validate_tick_format(&tick_format)?;
        self.core.layout.tick_format = tick_format;
        Ok(())
    }

    /// Width of the time track in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.core.layout.plot_width
    }

    pub fn set_width(&mut self, width: f64) -> GanttResult<()> {
        self.core.layout.plot_width = validate_plot_width(width)?;
        Ok(())
    }

    /// Plot height: the explicit height when one was set, otherwise one lane
    /// height per category.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.core
            .layout
            .plot_height(self.core.store.categories().len())
    }

    pub fn set_height(&mut self, height: f64) -> GanttResult<()> {
        self.core.layout.explicit_height = Some(validate_height(height)?);
        Ok(())
    }

    #[must_use]
    pub fn drag_handle_width(&self) -> f64 {
        self.core.scene.handle_width()
    }

    pub fn set_drag_handle_width(&mut self, handle_width: f64) -> GanttResult<()> {
        let handle_width = validate_handle_width(handle_width)?;
        self.core.scene.set_handle_width(handle_width);
        Ok(())
    }

    #[must_use]
    pub fn task_status(&self) -> &[String] {
        &self.core.task_status
    }

    pub fn set_task_status(&mut self, task_status: Vec<String>) {
        self.core.task_status = task_status;
    }

    #[must_use]
    pub fn time_domain(&self) -> TimeDomain {
        self.core.domain.domain()
    }

    /// Pins the domain and switches to `Fixed`. Applied by the next redraw.
    pub fn set_time_domain(&mut self, domain: TimeDomain) -> GanttResult<()> {
        let domain = TimeDomain::new(domain.start, domain.end)?;
        self.core.domain.set_fixed(domain);
        Ok(())
    }

    #[must_use]
    pub fn time_domain_mode(&self) -> TimeDomainMode {
        self.core.domain.mode()
    }

    #[must_use]
    pub fn entries(&self) -> &[WorkEntry] {
        self.core.store.all()
    }

    pub fn entry(&self, index: usize) -> GanttResult<&WorkEntry> {
        self.core.store.get(index)
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.core.store.categories()
    }

    #[must_use]
    pub fn category_source(&self) -> CategorySource {
        self.core.store.category_source()
    }

    #[must_use]
    pub fn context_menu_items(&self) -> &[String] {
        &self.core.context_menu_items
    }

    pub fn set_context_menu_items(&mut self, items: Vec<String>) -> GanttResult<()> {
        validate_context_menu_items(&items)?;
        self.core.context_menu_items = items;
        Ok(())
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.core.time_scale
    }

    #[must_use]
    pub fn lane_scale(&self) -> &LaneScale {
        &self.core.lane_scale
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.core.scene
    }

    /// Pixel x of `time` on the current time track, plot-relative.
    #[must_use]
    pub fn map_time_to_pixel(&self, time: DateTime<Utc>) -> f64 {
        self.core.time_scale.time_to_pixel(time)
    }

    pub fn map_pixel_to_time(&self, pixel: f64) -> GanttResult<DateTime<Utc>> {
        self.core.time_scale.pixel_to_time(pixel)
    }
}
