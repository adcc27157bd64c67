use crate::core::{DomainPolicy, EntryStore, LaneScale, Margin, TimeScale, Viewport};
use crate::extensions::{ContextMenu, GanttPlugin};
use crate::interaction::InteractionController;
use crate::scene::Scene;

/// Sizing and formatting knobs owned by the facade.
///
/// Changes take effect on the next redraw.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ChartLayout {
    pub(super) surface: Viewport,
    pub(super) margin: Margin,
    pub(super) plot_width: f64,
    pub(super) explicit_height: Option<f64>,
    pub(super) lane_height_px: f64,
    pub(super) tick_format: String,
}

impl ChartLayout {
    /// Explicit height when set, otherwise one lane height per category.
    pub(super) fn plot_height(&self, lanes: usize) -> f64 {
        self.explicit_height
            .unwrap_or(lanes as f64 * self.lane_height_px)
    }
}

/// Internal engine state used by the public facade (`GanttEngine`).
///
/// Scales are rebuilt by every redraw and reflect the last committed pass.
pub(super) struct EngineCore {
    pub(super) layout: ChartLayout,
    pub(super) store: EntryStore,
    pub(super) domain: DomainPolicy,
    pub(super) time_scale: TimeScale,
    pub(super) lane_scale: LaneScale,
    pub(super) interaction: InteractionController,
    pub(super) scene: Scene,
    pub(super) task_status: Vec<String>,
    pub(super) context_menu_items: Vec<String>,
    pub(super) plugins: Vec<Box<dyn GanttPlugin>>,
    pub(super) context_menu: Option<Box<dyn ContextMenu>>,
}
