//! Public engine facade.
//!
//! `GanttEngine` owns the entry store, the domain policy, both scales, the
//! gesture state machine and the retained scene. Its behavior is split across
//! the files of this module by concern: construction, accessors, redraw,
//! pointer routing, frame building, plugins and snapshots.

mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod interaction_coordinator;
mod plugin_dispatch;
mod redraw_coordinator;
mod render_frame_builder;
mod snapshot;
mod validation;

pub use engine::GanttEngine;
pub use engine_config::{GanttEngineConfig, SURFACE_GUTTER_PX};
pub use redraw_coordinator::RedrawReport;
pub use render_frame_builder::{
    AXIS_FONT_SIZE_PX, AXIS_TICK_PADDING_PX, AXIS_TICK_SIZE_PX, BAR_CORNER_RADIUS_PX,
    HANDLE_FILL_ALPHA, LANE_LABEL_PADDING_PX,
};
pub use snapshot::{
    BarSnapshot, GANTT_SNAPSHOT_JSON_SCHEMA_V1, GanttSnapshot, GanttSnapshotJsonContractV1,
};
