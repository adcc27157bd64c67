use serde::{Deserialize, Serialize};

use crate::core::{TimeDomain, TimeDomainMode, Viewport, WorkEntry};
use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;
use crate::scene::BarGeometry;

use super::GanttEngine;

pub const GANTT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Settled geometry of one bar, plot-relative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    pub entry_index: usize,
    pub label: String,
    pub geometry: BarGeometry,
    pub start_handle_visible: bool,
    pub end_handle_visible: bool,
}

/// Serializable deterministic state snapshot for regression tests and host
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttSnapshot {
    pub viewport: Viewport,
    pub plot_width: f64,
    pub plot_height: f64,
    pub time_domain: TimeDomain,
    pub time_domain_mode: TimeDomainMode,
    pub categories: Vec<String>,
    pub entries: Vec<WorkEntry>,
    pub bars: Vec<BarSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: GanttSnapshot,
}

impl GanttSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = GanttSnapshotJsonContractV1 {
            schema_version: GANTT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<GanttSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: GanttSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            GanttError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != GANTT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(GanttError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> GanttSnapshot {
        GanttSnapshot {
            viewport: self.core.layout.surface,
            plot_width: self.core.time_scale.width(),
            plot_height: self.core.lane_scale.height(),
            time_domain: self.core.domain.domain(),
            time_domain_mode: self.core.domain.mode(),
            categories: self.core.store.categories().to_vec(),
            entries: self.core.store.all().to_vec(),
            bars: self
                .core
                .scene
                .bars()
                .iter()
                .map(|bar| BarSnapshot {
                    entry_index: bar.entry_index,
                    label: bar.label.clone(),
                    geometry: bar.geometry,
                    start_handle_visible: bar.start_handle.visible,
                    end_handle_visible: bar.end_handle.visible,
                })
                .collect(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> GanttResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
