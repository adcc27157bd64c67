mod controller;

pub use controller::{DragTick, InteractionController, resolve_drag_tick};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a pointer drag edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragKind {
    /// Entry body: shifts both bounds, keeping the duration.
    Move,
    /// Left handle: edits `start_time`.
    ResizeStart,
    /// Right handle: edits `end_time`.
    ResizeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging(DragKind),
}

/// Input that may request a zoom. Only plain wheel input zooms the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomTrigger {
    Wheel,
    DragPan,
    DoubleClick,
    Touch,
}

impl ZoomTrigger {
    #[must_use]
    pub fn zooms(self) -> bool {
        matches!(self, Self::Wheel)
    }
}

/// Per-gesture state, discarded on pointer release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub entry_index: usize,
    pub kind: DragKind,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
}
