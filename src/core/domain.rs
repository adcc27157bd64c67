use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::WorkEntry;
use crate::core::primitives::{ceil_to_hour, floor_to_hour, offset_hours};
use crate::error::{GanttError, GanttResult};

/// Hours shown before "now" when there is nothing to fit.
pub const EMPTY_DOMAIN_LOOKBACK_HOURS: i64 = 3 * 24;
/// Hours shown after "now" when there is nothing to fit.
pub const EMPTY_DOMAIN_LOOKAHEAD_HOURS: i64 = 3;
/// Wheel delta units per hour of zoom offset.
pub const WHEEL_DELTA_PER_HOUR: f64 = 60.0;

/// Time interval mapped onto the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDomain {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeDomain {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GanttResult<Self> {
        if start > end {
            return Err(GanttError::InvalidData(format!(
                "time domain start {start} must not be after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive containment on both edges.
    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }

    /// Default window used when there are no entries: three days back, three
    /// hours ahead.
    pub fn around_now(now: DateTime<Utc>) -> GanttResult<Self> {
        Self::new(
            offset_hours(now, -EMPTY_DOMAIN_LOOKBACK_HOURS)?,
            offset_hours(now, EMPTY_DOMAIN_LOOKAHEAD_HOURS)?,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeDomainMode {
    /// Domain follows the data extents on every redraw.
    #[default]
    Fit,
    /// Domain was set explicitly (zoom or setter) and stays frozen.
    Fixed,
}

/// Owns the active time window and the mode that decides how it evolves.
///
/// There is no transition back to `Fit` once the domain has been fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainPolicy {
    mode: TimeDomainMode,
    domain: TimeDomain,
}

impl DomainPolicy {
    pub fn new(now: DateTime<Utc>) -> GanttResult<Self> {
        Ok(Self {
            mode: TimeDomainMode::Fit,
            domain: TimeDomain::around_now(now)?,
        })
    }

    #[must_use]
    pub fn mode(self) -> TimeDomainMode {
        self.mode
    }

    #[must_use]
    pub fn domain(self) -> TimeDomain {
        self.domain
    }

    /// Computes the window for `mode` without touching policy state.
    pub fn compute_domain(
        entries: &[WorkEntry],
        mode: TimeDomainMode,
        prior: TimeDomain,
        now: DateTime<Utc>,
    ) -> GanttResult<TimeDomain> {
        match mode {
            TimeDomainMode::Fit => fit_domain(entries, now),
            TimeDomainMode::Fixed => Ok(prior),
        }
    }

    /// Recomputes the domain for a redraw. Fixed domains are returned as-is.
    pub fn refresh(&mut self, entries: &[WorkEntry], now: DateTime<Utc>) -> GanttResult<TimeDomain> {
        self.domain = Self::compute_domain(entries, self.mode, self.domain, now)?;
        Ok(self.domain)
    }

    /// Replaces the domain and freezes it.
    pub fn set_fixed(&mut self, domain: TimeDomain) {
        self.mode = TimeDomainMode::Fixed;
        self.domain = domain;
    }

    /// Applies one wheel zoom step and freezes the result.
    pub fn zoom(&mut self, wheel_delta: f64) -> GanttResult<TimeDomain> {
        let zoomed = zoom_domain(self.domain, wheel_delta)?;
        debug!(
            wheel_delta,
            start = %zoomed.start,
            end = %zoomed.end,
            "zoom time domain"
        );
        self.set_fixed(zoomed);
        Ok(zoomed)
    }
}

/// Extents of the entries, or the default window around `now` when empty.
pub fn fit_domain(entries: &[WorkEntry], now: DateTime<Utc>) -> GanttResult<TimeDomain> {
    let mut extents: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for entry in entries {
        extents = Some(match extents {
            None => (entry.start_time, entry.end_time),
            Some((start, end)) => (start.min(entry.start_time), end.max(entry.end_time)),
        });
    }

    match extents {
        Some((start, end)) => TimeDomain::new(start, end),
        None => TimeDomain::around_now(now),
    }
}

/// Converts a raw wheel delta into the whole-hour offset applied by a zoom.
pub fn wheel_delta_to_hours(wheel_delta: f64) -> GanttResult<i64> {
    if !wheel_delta.is_finite() {
        return Err(GanttError::InvalidData(
            "wheel delta must be finite".to_owned(),
        ));
    }
    let hours = (wheel_delta / WHEEL_DELTA_PER_HOUR).floor();
    if hours.abs() > i64::from(i32::MAX) as f64 {
        return Err(GanttError::InvalidData(
            "wheel delta is out of range".to_owned(),
        ));
    }
    Ok(hours as i64)
}

/// Shifts both edges by the wheel offset, flooring the start and ceiling the
/// end to the hour. Repeated scrolling in one direction slowly widens the
/// window, the other direction narrows it.
pub fn zoom_domain(domain: TimeDomain, wheel_delta: f64) -> GanttResult<TimeDomain> {
    let hours = wheel_delta_to_hours(wheel_delta)?;
    let start = floor_to_hour(offset_hours(domain.start, hours)?)?;
    let end = ceil_to_hour(offset_hours(domain.end, hours)?)?;
    TimeDomain::new(start, end)
}
