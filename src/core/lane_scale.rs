use serde::{Deserialize, Serialize};

use crate::core::WorkEntry;
use crate::error::{GanttError, GanttResult};

/// Vertical pixel interval `[offset, offset + height)` of one lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneBand {
    pub offset: f64,
    pub height: f64,
}

impl LaneBand {
    #[must_use]
    pub fn center(self) -> f64 {
        self.offset + self.height / 2.0
    }

    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        self.offset <= y && y < self.offset + self.height
    }
}

/// Band scale assigning each category an equal, pixel-rounded slice of the
/// plot height, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneScale {
    lanes: Vec<String>,
    height: f64,
    step: f64,
    start: f64,
}

impl LaneScale {
    pub fn new(lanes: &[String], height: f64) -> GanttResult<Self> {
        if !height.is_finite() || height < 0.0 {
            return Err(GanttError::InvalidData(
                "lane scale height must be finite and >= 0".to_owned(),
            ));
        }

        let count = lanes.len() as f64;
        let (step, start) = if lanes.is_empty() {
            (0.0, 0.0)
        } else {
            let step = (height / count).floor();
            // Leftover pixels are split evenly above and below the lanes.
            (step, ((height - step * count) / 2.0).round())
        };

        Ok(Self {
            lanes: lanes.to_vec(),
            height,
            step,
            start,
        })
    }

    #[must_use]
    pub fn lanes(&self) -> &[String] {
        &self.lanes
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn band(&self, category: &str) -> Option<LaneBand> {
        self.lanes
            .iter()
            .position(|lane| lane == category)
            .map(|index| LaneBand {
                offset: self.start + self.step * index as f64,
                height: self.step,
            })
    }

    /// Lane of `entry`; a category outside the lane set is a configuration
    /// error.
    pub fn band_for(&self, entry: &WorkEntry) -> GanttResult<LaneBand> {
        self.band(&entry.category)
            .ok_or_else(|| GanttError::UnknownCategory {
                label: entry.label.clone(),
                category: entry.category.clone(),
            })
    }

    #[must_use]
    pub fn bands(&self) -> Vec<(&str, LaneBand)> {
        self.lanes
            .iter()
            .enumerate()
            .map(|(index, lane)| {
                (
                    lane.as_str(),
                    LaneBand {
                        offset: self.start + self.step * index as f64,
                        height: self.step,
                    },
                )
            })
            .collect()
    }
}
