use crate::error::{GanttError, GanttResult};

/// Continuous linear mapping between a numeric domain and a pixel range.
///
/// A degenerate domain (`start == end`) maps every value onto the middle of
/// the range. With clamping enabled, both directions saturate at the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> GanttResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(GanttError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
            clamp: false,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> GanttResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(GanttError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    pub fn domain_to_pixel(self, value: f64) -> GanttResult<f64> {
        if !value.is_finite() {
            return Err(GanttError::InvalidData("value must be finite".to_owned()));
        }
        Ok(interpolate(
            value,
            (self.domain_start, self.domain_end),
            (self.range_start, self.range_end),
            self.clamp,
        ))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> GanttResult<f64> {
        if !pixel.is_finite() {
            return Err(GanttError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(interpolate(
            pixel,
            (self.range_start, self.range_end),
            (self.domain_start, self.domain_end),
            self.clamp,
        ))
    }
}

fn interpolate(value: f64, from: (f64, f64), to: (f64, f64), clamp: bool) -> f64 {
    let from_span = from.1 - from.0;
    let to_span = to.1 - to.0;
    if from_span == 0.0 {
        return to.0 + to_span * 0.5;
    }

    let value = if clamp {
        value.clamp(from.0.min(from.1), from.0.max(from.1))
    } else {
        value
    };
    // Multiply before dividing so integral inputs map exactly.
    to.0 + (value - from.0) * to_span / from_span
}
