//! gantt-rs: headless interactive timeline (Gantt) chart engine.
//!
//! Work entries are laid out in category lanes against a time axis. The
//! engine owns the time/lane scales, the auto-fit or fixed time domain, the
//! drag/resize gesture state machine and a retained scene reconciled on every
//! redraw. Drawing goes through backend-agnostic render frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig};
pub use error::{GanttError, GanttResult};
