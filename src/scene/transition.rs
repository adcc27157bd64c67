use serde::{Deserialize, Serialize};

use crate::core::TimeDomain;
use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::error::GanttResult;

/// Shared duration for every positional transition, so the axis and the bars
/// move in lockstep.
pub const TRANSITION_DURATION_MS: f64 = 250.0;

/// Cubic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Eased progress of a transition started at `started_at_ms`, observed at
/// `clock_ms`.
#[must_use]
pub fn progress(started_at_ms: f64, clock_ms: f64) -> f64 {
    ease_cubic_in_out((clock_ms - started_at_ms) / TRANSITION_DURATION_MS)
}

/// Position and size of one bar group, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        let mix = |from: f64, to: f64| from + (to - from) * t;
        Self {
            x: mix(self.x, target.x),
            y: mix(self.y, target.y),
            width: mix(self.width, target.width),
            height: mix(self.height, target.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarTransition {
    pub from: BarGeometry,
    pub started_at_ms: f64,
}

impl BarTransition {
    #[must_use]
    pub fn sample(self, target: BarGeometry, clock_ms: f64) -> BarGeometry {
        self.from.lerp(target, progress(self.started_at_ms, clock_ms))
    }

    #[must_use]
    pub fn is_finished(self, clock_ms: f64) -> bool {
        clock_ms - self.started_at_ms >= TRANSITION_DURATION_MS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainTransition {
    pub from: TimeDomain,
    pub to: TimeDomain,
    pub started_at_ms: f64,
}

impl DomainTransition {
    pub fn sample(self, clock_ms: f64) -> GanttResult<TimeDomain> {
        let t = progress(self.started_at_ms, clock_ms);
        let mix = |from, to| {
            let from = datetime_to_unix_millis(from);
            unix_millis_to_datetime(from + (datetime_to_unix_millis(to) - from) * t)
        };
        Ok(TimeDomain {
            start: mix(self.from.start, self.to.start)?,
            end: mix(self.from.end, self.to.end)?,
        })
    }

    #[must_use]
    pub fn is_finished(self, clock_ms: f64) -> bool {
        clock_ms - self.started_at_ms >= TRANSITION_DURATION_MS
    }
}
