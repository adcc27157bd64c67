//! Retained visual state of the chart.
//!
//! The scene mirrors what is on screen: one bar element per entry (matched by
//! reconciliation key), its two drag handles, both axes and any in-flight
//! transitions. [`RenderSync`] is the only writer.

mod axis;
mod reconcile;
mod transition;

pub use axis::{
    LaneAxis, LaneLabel, TIME_AXIS_TICK_COUNT, TimeAxis, TimeTick, tick_interval_ms, time_ticks,
    validate_tick_format,
};
pub use hit_test::{HitRegion, HitTarget};
pub use reconcile::{ReconcileStats, RenderSync, SyncInput};
pub use transition::{
    BarGeometry, BarTransition, DomainTransition, TRANSITION_DURATION_MS, ease_cubic_in_out,
};

use serde::{Deserialize, Serialize};

use crate::core::{EntryKey, RgbColor, TimeDomain};
use crate::error::{GanttError, GanttResult};

/// Resize handle attached to one edge of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleElement {
    /// Left edge relative to the bar's x position.
    pub offset_x: f64,
    pub width: f64,
    /// Hidden whenever the edge's time lies outside the domain.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarElement {
    /// Key of the bound entry as of its last stable state.
    pub key: EntryKey,
    pub entry_index: usize,
    pub label: String,
    pub color: RgbColor,
    /// Target geometry; what the bar shows once transitions settle.
    pub geometry: BarGeometry,
    pub start_handle: HandleElement,
    pub end_handle: HandleElement,
    pub transition: Option<BarTransition>,
}

impl BarElement {
    #[must_use]
    pub fn displayed_geometry(&self, clock_ms: f64) -> BarGeometry {
        self.transition
            .map_or(self.geometry, |transition| transition.sample(self.geometry, clock_ms))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    bars: Vec<BarElement>,
    time_axis: TimeAxis,
    lane_axis: LaneAxis,
    axis_domain: Option<TimeDomain>,
    axis_transition: Option<DomainTransition>,
    clock_ms: f64,
    handle_width: f64,
}

impl Scene {
    #[must_use]
    pub fn new(handle_width: f64) -> Self {
        Self {
            bars: Vec::new(),
            time_axis: TimeAxis::default(),
            lane_axis: LaneAxis::default(),
            axis_domain: None,
            axis_transition: None,
            clock_ms: 0.0,
            handle_width,
        }
    }

    #[must_use]
    pub fn bars(&self) -> &[BarElement] {
        &self.bars
    }

    /// Element currently bound to entry `entry_index`.
    #[must_use]
    pub fn bar(&self, entry_index: usize) -> Option<&BarElement> {
        match self.bars.get(entry_index) {
            Some(bar) if bar.entry_index == entry_index => Some(bar),
            _ => self.bars.iter().find(|bar| bar.entry_index == entry_index),
        }
    }

    pub(crate) fn bar_mut(&mut self, entry_index: usize) -> Option<&mut BarElement> {
        let position = match self.bars.get(entry_index) {
            Some(bar) if bar.entry_index == entry_index => Some(entry_index),
            _ => self
                .bars
                .iter()
                .position(|bar| bar.entry_index == entry_index),
        }?;
        self.bars.get_mut(position)
    }

    #[must_use]
    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    #[must_use]
    pub fn lane_axis(&self) -> &LaneAxis {
        &self.lane_axis
    }

    #[must_use]
    pub fn handle_width(&self) -> f64 {
        self.handle_width
    }

    pub(crate) fn set_handle_width(&mut self, handle_width: f64) {
        self.handle_width = handle_width;
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    #[must_use]
    pub fn axis_domain(&self) -> Option<TimeDomain> {
        self.axis_domain
    }

    /// Axis domain as displayed at `clock_ms`, following any running axis
    /// transition.
    pub fn displayed_axis_domain(&self, clock_ms: f64) -> GanttResult<Option<TimeDomain>> {
        match self.axis_transition {
            Some(transition) => transition.sample(clock_ms).map(Some),
            None => Ok(self.axis_domain),
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.axis_transition.is_some() || self.bars.iter().any(|bar| bar.transition.is_some())
    }

    /// Advances the animation clock and drops finished transitions.
    ///
    /// Returns whether anything is still moving.
    pub fn advance(&mut self, delta_ms: f64) -> GanttResult<bool> {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            return Err(GanttError::InvalidData(
                "animation delta must be finite and >= 0".to_owned(),
            ));
        }
        self.clock_ms += delta_ms;
        let clock_ms = self.clock_ms;

        for bar in &mut self.bars {
            if bar
                .transition
                .is_some_and(|transition| transition.is_finished(clock_ms))
            {
                bar.transition = None;
            }
        }
        if self
            .axis_transition
            .is_some_and(|transition| transition.is_finished(clock_ms))
        {
            self.axis_transition = None;
        }

        Ok(self.is_animating())
    }
}
