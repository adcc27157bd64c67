use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::scene::validate_tick_format;

use super::validation::{
    validate_context_menu_items, validate_handle_width, validate_height, validate_lane_height,
};

/// Pixels kept free between the plot and the surface's right edge.
pub const SURFACE_GUTTER_PX: f64 = 5.0;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist and reload a
/// chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    /// Pixel size of the drawing surface, read once at construction.
    pub surface: Viewport,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default = "default_tick_format")]
    pub tick_format: String,
    /// Explicit plot height; derived from the lane count when absent.
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default = "default_lane_height_px")]
    pub lane_height_px: f64,
    #[serde(default = "default_drag_handle_width_px")]
    pub drag_handle_width_px: f64,
    /// Explicit lane ordering; derived from the entries when absent.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Stored for hosts, not consumed by the engine.
    #[serde(default)]
    pub task_status: Vec<String>,
    #[serde(default = "default_context_menu_items")]
    pub context_menu_items: Vec<String>,
}

fn default_tick_format() -> String {
    "%H:%M".to_owned()
}

fn default_lane_height_px() -> f64 {
    25.0
}

fn default_drag_handle_width_px() -> f64 {
    10.0
}

fn default_context_menu_items() -> Vec<String> {
    vec!["item1".to_owned(), "item2".to_owned()]
}

impl GanttEngineConfig {
    #[must_use]
    pub fn new(surface: Viewport) -> Self {
        Self {
            surface,
            margin: Margin::default(),
            tick_format: default_tick_format(),
            height: None,
            lane_height_px: default_lane_height_px(),
            drag_handle_width_px: default_drag_handle_width_px(),
            categories: None,
            task_status: Vec::new(),
            context_menu_items: default_context_menu_items(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_tick_format(mut self, tick_format: impl Into<String>) -> Self {
        self.tick_format = tick_format.into();
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    #[must_use]
    pub fn with_task_status(mut self, task_status: Vec<String>) -> Self {
        self.task_status = task_status;
        self
    }

    #[must_use]
    pub fn with_context_menu_items(mut self, items: Vec<String>) -> Self {
        self.context_menu_items = items;
        self
    }

    /// Width of the time track: surface width minus both side margins and the
    /// right gutter.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        f64::from(self.surface.width) - self.margin.horizontal() - SURFACE_GUTTER_PX
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !self.surface.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        self.margin.validate()?;
        let plot_width = self.plot_width();
        if plot_width <= 0.0 {
            return Err(GanttError::InvalidData(format!(
                "surface width {} leaves no room for the plot (plot width {plot_width})",
                self.surface.width
            )));
        }
        validate_tick_format(&self.tick_format)?;
        if let Some(height) = self.height {
            validate_height(height)?;
        }
        validate_lane_height(self.lane_height_px)?;
        validate_handle_width(self.drag_handle_width_px)?;
        validate_context_menu_items(&self.context_menu_items)
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse config: {e}")))
    }
}
