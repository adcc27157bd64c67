use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// 8-bit RGB fill color of an entry, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#RRGGBB` or `#RGB` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> GanttResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        let invalid = || GanttError::InvalidData(format!("invalid hex color `{input}`"));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |text: &str| u8::from_str_radix(text, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |text: &str| channel(text).map(|value| value * 17);
                Ok(Self::new(
                    short(&digits[0..1])?,
                    short(&digits[1..2])?,
                    short(&digits[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = GanttError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

/// One time-bounded work item drawn as a bar in its category lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub label: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub category: String,
    pub status: String,
    pub color: RgbColor,
}

impl WorkEntry {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        category: impl Into<String>,
        status: impl Into<String>,
        color: RgbColor,
    ) -> Self {
        Self {
            label: label.into(),
            start_time,
            end_time,
            category: category.into(),
            status: status.into(),
            color,
        }
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Reconciliation key `(start, label, end)`.
    ///
    /// The key changes on every edit of the time bounds.
    #[must_use]
    pub fn key(&self) -> EntryKey {
        EntryKey {
            start_millis: self.start_time.timestamp_millis(),
            label: self.label.clone(),
            end_millis: self.end_time.timestamp_millis(),
        }
    }

    pub fn validate_bounds(&self) -> GanttResult<()> {
        if self.start_time > self.end_time {
            return Err(GanttError::InvalidEntryBounds {
                label: self.label.clone(),
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }
}

/// Composite identity used to match entries against visual elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub start_millis: i64,
    pub label: String,
    pub end_millis: i64,
}
