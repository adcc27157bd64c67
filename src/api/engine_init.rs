use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{DomainPolicy, EntryStore, LaneScale, TimeScale, WorkEntry};
use crate::error::GanttResult;
use crate::interaction::InteractionController;
use crate::render::Renderer;
use crate::scene::Scene;

use super::engine_core::{ChartLayout, EngineCore};
use super::{GanttEngine, GanttEngineConfig};

impl<R: Renderer> GanttEngine<R> {
    /// Creates the engine and runs the initial redraw.
    ///
    /// Entries are validated against the configured lanes (or the lanes
    /// derived from them); the empty-chart window is anchored at the current
    /// wall-clock time.
    pub fn new(renderer: R, config: GanttEngineConfig, entries: Vec<WorkEntry>) -> GanttResult<Self> {
        Self::new_at(renderer, config, entries, Utc::now())
    }

    /// Same as [`GanttEngine::new`] with an explicit "now".
    pub fn new_at(
        renderer: R,
        config: GanttEngineConfig,
        entries: Vec<WorkEntry>,
        now: DateTime<Utc>,
    ) -> GanttResult<Self> {
        config.validate()?;
        let plot_width = config.plot_width();

        let GanttEngineConfig {
            surface,
            margin,
            tick_format,
            height,
            lane_height_px,
            drag_handle_width_px,
            categories,
            task_status,
            context_menu_items,
        } = config;
        let layout = ChartLayout {
            surface,
            margin,
            plot_width,
            explicit_height: height,
            lane_height_px,
            tick_format,
        };

        let store = EntryStore::new(entries, categories)?;
        let domain = DomainPolicy::new(now)?;
        // Placeholders until the initial redraw below commits real scales.
        let time_scale = TimeScale::new(domain.domain(), layout.plot_width)?;
        let lane_scale = LaneScale::new(&[], 0.0)?;

        let mut engine = Self {
            renderer,
            core: EngineCore {
                layout,
                store,
                domain,
                time_scale,
                lane_scale,
                interaction: InteractionController::default(),
                scene: Scene::new(drag_handle_width_px),
                task_status,
                context_menu_items,
                plugins: Vec::new(),
                context_menu: None,
            },
        };

        let report = engine.redraw_at(None, now)?;
        debug!(
            entries = engine.core.store.len(),
            lanes = report.lanes,
            created = report.stats.created,
            "engine initialized"
        );
        Ok(engine)
    }
}
