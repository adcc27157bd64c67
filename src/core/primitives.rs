use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{GanttError, GanttResult};

pub const MILLIS_PER_HOUR: i64 = 3_600_000;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts a fractional millisecond timestamp back to a `DateTime`, rounding
/// to the nearest millisecond.
pub fn unix_millis_to_datetime(millis: f64) -> GanttResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(GanttError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    let rounded = millis.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return Err(GanttError::InvalidData(
            "timestamp is out of range".to_owned(),
        ));
    }
    millis_to_datetime(rounded as i64)
}

pub fn millis_to_datetime(millis: i64) -> GanttResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| GanttError::InvalidData(format!("timestamp {millis}ms is out of range")))
}

/// Shifts `time` by a whole number of hours.
pub fn offset_hours(time: DateTime<Utc>, hours: i64) -> GanttResult<DateTime<Utc>> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| time.checked_add_signed(delta))
        .ok_or_else(|| GanttError::InvalidData(format!("cannot offset {time} by {hours}h")))
}

pub fn floor_to_hour(time: DateTime<Utc>) -> GanttResult<DateTime<Utc>> {
    let millis = time.timestamp_millis();
    millis_to_datetime(millis - millis.rem_euclid(MILLIS_PER_HOUR))
}

/// Rounds up to the next hour boundary; exact hours are returned unchanged.
pub fn ceil_to_hour(time: DateTime<Utc>) -> GanttResult<DateTime<Utc>> {
    let millis = time.timestamp_millis();
    let remainder = millis.rem_euclid(MILLIS_PER_HOUR);
    if remainder == 0 {
        return Ok(time);
    }
    millis
        .checked_add(MILLIS_PER_HOUR - remainder)
        .ok_or_else(|| GanttError::InvalidData(format!("cannot round {time} up to the hour")))
        .and_then(millis_to_datetime)
}
