pub mod domain;
pub mod entry;
pub mod entry_store;
pub mod lane_scale;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use domain::{DomainPolicy, TimeDomain, TimeDomainMode, zoom_domain};
pub use entry::{EntryKey, RgbColor, WorkEntry};
pub use entry_store::{CategorySource, EntryStore};
pub use lane_scale::{LaneBand, LaneScale};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{Margin, Viewport};
