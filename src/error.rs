use chrono::{DateTime, Utc};
use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("entry `{label}` ends before it starts: start={start}, end={end}")]
    InvalidEntryBounds {
        label: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("entry `{label}` references unknown category `{category}`")]
    UnknownCategory { label: String, category: String },

    #[error("entry index {index} is out of range for {len} entries")]
    EntryIndexOutOfRange { index: usize, len: usize },

    #[error("invalid tick format: {0}")]
    InvalidTickFormat(String),
}
