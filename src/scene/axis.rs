use chrono::{DateTime, Utc};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::primitives::millis_to_datetime;
use crate::core::{LaneScale, TimeDomain, TimeScale};
use crate::error::{GanttError, GanttResult};

/// Approximate number of ticks requested from the time axis.
pub const TIME_AXIS_TICK_COUNT: usize = 10;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

const TICK_INTERVALS_MS: [i64; 15] = [
    SECOND_MS,
    5 * SECOND_MS,
    15 * SECOND_MS,
    30 * SECOND_MS,
    MINUTE_MS,
    5 * MINUTE_MS,
    15 * MINUTE_MS,
    30 * MINUTE_MS,
    HOUR_MS,
    3 * HOUR_MS,
    6 * HOUR_MS,
    12 * HOUR_MS,
    DAY_MS,
    2 * DAY_MS,
    WEEK_MS,
];

/// Fails when `format` is empty or contains an unknown strftime specifier.
pub fn validate_tick_format(format: &str) -> GanttResult<()> {
    if format.is_empty() {
        return Err(GanttError::InvalidTickFormat(
            "tick format must not be empty".to_owned(),
        ));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(GanttError::InvalidTickFormat(format!(
            "`{format}` is not a valid strftime pattern"
        )));
    }
    Ok(())
}

/// Picks the calendar-friendly interval closest to `span / count`.
#[must_use]
pub fn tick_interval_ms(span_ms: i64, count: usize) -> i64 {
    let count = count.max(1) as f64;
    let target = span_ms.max(1) as f64 / count;
    let index = TICK_INTERVALS_MS.partition_point(|&interval| interval as f64 <= target);

    if index == 0 {
        return (target.round() as i64).max(1);
    }
    if index == TICK_INTERVALS_MS.len() {
        return WEEK_MS * (target / WEEK_MS as f64).ceil() as i64;
    }

    let lower = TICK_INTERVALS_MS[index - 1];
    let upper = TICK_INTERVALS_MS[index];
    if target / (lower as f64) < (upper as f64) / target {
        lower
    } else {
        upper
    }
}

/// Tick instants aligned to multiples of the chosen interval, inside `domain`.
pub fn time_ticks(domain: TimeDomain, count: usize) -> GanttResult<Vec<DateTime<Utc>>> {
    let start = domain.start.timestamp_millis();
    let end = domain.end.timestamp_millis();
    let step = tick_interval_ms(end - start, count);

    let remainder = start.rem_euclid(step);
    let mut tick = if remainder == 0 {
        start
    } else {
        start - remainder + step
    };

    let mut ticks = Vec::new();
    while tick <= end {
        ticks.push(millis_to_datetime(tick)?);
        match tick.checked_add(step) {
            Some(next) => tick = next,
            None => break,
        }
    }
    Ok(ticks)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTick {
    pub time: DateTime<Utc>,
    pub x: f64,
    pub label: String,
}

/// Bottom axis: formatted ticks along the plot's lower edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeAxis {
    pub ticks: Vec<TimeTick>,
    pub baseline_y: f64,
}

impl TimeAxis {
    pub fn build(time_scale: &TimeScale, tick_format: &str, plot_height: f64) -> GanttResult<Self> {
        validate_tick_format(tick_format)?;
        let ticks = time_ticks(time_scale.domain(), TIME_AXIS_TICK_COUNT)?
            .into_iter()
            .map(|time| TimeTick {
                time,
                x: time_scale.time_to_pixel(time),
                label: time.format(tick_format).to_string(),
            })
            .collect();

        Ok(Self {
            ticks,
            baseline_y: plot_height,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneLabel {
    pub category: String,
    pub y_center: f64,
}

/// Left axis: one label per lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LaneAxis {
    pub labels: Vec<LaneLabel>,
    pub height: f64,
}

impl LaneAxis {
    #[must_use]
    pub fn build(lane_scale: &LaneScale) -> Self {
        Self {
            labels: lane_scale
                .bands()
                .into_iter()
                .map(|(category, band)| LaneLabel {
                    category: category.to_owned(),
                    y_center: band.center(),
                })
                .collect(),
            height: lane_scale.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{HOUR_MS, MINUTE_MS, tick_interval_ms, time_ticks, validate_tick_format};
    use crate::core::TimeDomain;

    #[test]
    fn interval_tracks_requested_density() {
        assert_eq!(tick_interval_ms(9 * HOUR_MS, 10), HOUR_MS);
        assert_eq!(tick_interval_ms(4 * HOUR_MS, 10), 30 * MINUTE_MS);
        assert_eq!(tick_interval_ms(10 * MINUTE_MS, 10), MINUTE_MS);
    }

    #[test]
    fn ticks_are_aligned_and_inside_domain() {
        let domain = TimeDomain::new(
            Utc.with_ymd_and_hms(2010, 12, 1, 11, 10, 0).unwrap(),
            Utc.with_ymd_and_hms(2010, 12, 1, 20, 10, 0).unwrap(),
        )
        .unwrap();
        let ticks = time_ticks(domain, 10).expect("ticks");
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[0], Utc.with_ymd_and_hms(2010, 12, 1, 12, 0, 0).unwrap());
        assert_eq!(
            ticks.last().copied(),
            Some(Utc.with_ymd_and_hms(2010, 12, 1, 20, 0, 0).unwrap())
        );
    }

    #[test]
    fn tick_format_is_validated() {
        assert!(validate_tick_format("%H:%M").is_ok());
        assert!(validate_tick_format("").is_err());
        assert!(validate_tick_format("%!").is_err());
    }
}
