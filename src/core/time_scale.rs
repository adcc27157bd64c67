use chrono::{DateTime, Utc};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::{LinearScale, TimeDomain};
use crate::error::{GanttError, GanttResult};

/// Clamped mapping between the active time domain and `[0, width]`.
///
/// Scales are rebuilt rather than mutated whenever the domain or the plot
/// width changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: TimeDomain,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: TimeDomain, width: f64) -> GanttResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(GanttError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }

        let linear = LinearScale::new(
            datetime_to_unix_millis(domain.start),
            datetime_to_unix_millis(domain.end),
        )?
        .with_range(0.0, width)?
        .with_clamp(true);

        Ok(Self { domain, linear })
    }

    #[must_use]
    pub fn domain(self) -> TimeDomain {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn width(self) -> f64 {
        let (start, end) = self.linear.range();
        end - start
    }

    /// Off-domain times land on the nearest track edge.
    #[must_use]
    pub fn time_to_pixel(self, time: DateTime<Utc>) -> f64 {
        let (range_start, range_end) = self.linear.range();
        self.linear
            .domain_to_pixel(datetime_to_unix_millis(time))
            .unwrap_or(if time < self.domain.start {
                range_start
            } else {
                range_end
            })
    }

    pub fn pixel_to_time(self, pixel: f64) -> GanttResult<DateTime<Utc>> {
        unix_millis_to_datetime(self.linear.pixel_to_domain(pixel)?)
    }

    /// Inclusive check against the pixel range.
    #[must_use]
    pub fn contains_pixel(self, pixel: f64) -> bool {
        let (start, end) = self.linear.range();
        pixel.is_finite() && start <= pixel && pixel <= end
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::TimeScale;
    use crate::core::TimeDomain;

    fn scale() -> TimeScale {
        let domain = TimeDomain::new(
            Utc.with_ymd_and_hms(2010, 12, 1, 11, 10, 0).unwrap(),
            Utc.with_ymd_and_hms(2010, 12, 1, 20, 10, 0).unwrap(),
        )
        .unwrap();
        TimeScale::new(domain, 540.0).expect("scale")
    }

    #[test]
    fn maps_one_minute_per_pixel() {
        let scale = scale();
        let time = Utc.with_ymd_and_hms(2010, 12, 1, 16, 0, 0).unwrap();
        assert_eq!(scale.time_to_pixel(time), 290.0);
        assert_eq!(scale.pixel_to_time(290.0).unwrap(), time);
    }

    #[test]
    fn clamps_off_domain_values() {
        let scale = scale();
        let before = Utc.with_ymd_and_hms(2010, 12, 1, 1, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2010, 12, 2, 1, 0, 0).unwrap();
        assert_eq!(scale.time_to_pixel(before), 0.0);
        assert_eq!(scale.time_to_pixel(after), 540.0);
        assert_eq!(scale.pixel_to_time(-50.0).unwrap(), scale.domain().start);
        assert_eq!(scale.pixel_to_time(900.0).unwrap(), scale.domain().end);
    }

    #[test]
    fn pixel_containment_is_inclusive() {
        let scale = scale();
        assert!(scale.contains_pixel(0.0));
        assert!(scale.contains_pixel(540.0));
        assert!(!scale.contains_pixel(-0.5));
        assert!(!scale.contains_pixel(540.5));
        assert!(!scale.contains_pixel(f64::NAN));
    }

    #[test]
    fn rejects_non_positive_width() {
        let domain = scale().domain();
        assert!(TimeScale::new(domain, 0.0).is_err());
        assert!(TimeScale::new(domain, f64::NAN).is_err());
    }
}
