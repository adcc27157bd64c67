use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LaneScale, TimeDomain, TimeDomainMode, TimeScale, WorkEntry};
use crate::error::GanttResult;
use crate::extensions::GanttEvent;
use crate::render::Renderer;
use crate::scene::{ReconcileStats, RenderSync, SyncInput};

use super::GanttEngine;

/// Summary of one committed redraw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedrawReport {
    pub stats: ReconcileStats,
    pub domain: TimeDomain,
    pub mode: TimeDomainMode,
    pub lanes: usize,
    pub plot_height: f64,
}

impl<R: Renderer> GanttEngine<R> {
    /// Single idempotent refresh entry point.
    ///
    /// With `Some(entries)` the entry set is replaced wholesale first. Lanes,
    /// the time domain and both scales are then recomputed and the scene is
    /// reconciled. Redrawing twice with unchanged data creates and removes
    /// nothing.
    pub fn redraw(&mut self, entries: Option<Vec<WorkEntry>>) -> GanttResult<RedrawReport> {
        self.redraw_at(entries, Utc::now())
    }

    /// Same as [`GanttEngine::redraw`] with an explicit "now", used for the
    /// empty-chart window.
    ///
    /// Every step is resolved before anything is committed: on error the
    /// engine keeps its previous entries, domain, scales and scene.
    pub fn redraw_at(
        &mut self,
        entries: Option<Vec<WorkEntry>>,
        now: DateTime<Utc>,
    ) -> GanttResult<RedrawReport> {
        let staged_store = entries
            .map(|entries| self.core.store.replaced(entries))
            .transpose()?;
        let store = staged_store.as_ref().unwrap_or(&self.core.store);

        let previous_domain = self.core.time_scale.domain();
        let mut policy = self.core.domain;
        let domain = policy.refresh(store.all(), now)?;

        let lanes = store.categories().len();
        let plot_height = self.core.layout.plot_height(lanes);
        let time_scale = TimeScale::new(domain, self.core.layout.plot_width)?;
        let lane_scale = LaneScale::new(store.categories(), plot_height)?;

        let stats = RenderSync::reconcile(
            &mut self.core.scene,
            SyncInput {
                entries: store.all(),
                time_scale: &time_scale,
                lane_scale: &lane_scale,
                tick_format: &self.core.layout.tick_format,
            },
        )?;

        let replaced = staged_store.is_some();
        let mut dropped_session = None;
        if let Some(store) = staged_store {
            self.core.store = store;
            dropped_session = self.core.interaction.end();
            if let Some(session) = dropped_session {
                debug!(
                    entry_index = session.entry_index,
                    "drag dropped by entry replacement"
                );
            }
        }
        self.core.domain = policy;
        self.core.time_scale = time_scale;
        self.core.lane_scale = lane_scale;

        let report = RedrawReport {
            stats,
            domain,
            mode: policy.mode(),
            lanes,
            plot_height,
        };
        debug!(
            created = stats.created,
            updated = stats.updated,
            removed = stats.removed,
            lanes,
            start = %domain.start,
            end = %domain.end,
            mode = ?report.mode,
            "redraw"
        );

        if let Some(session) = dropped_session {
            self.emit_plugin_event(GanttEvent::DragEnded {
                entry_index: session.entry_index,
            });
        }
        if replaced {
            self.emit_plugin_event(GanttEvent::EntriesReplaced {
                entries_len: self.core.store.len(),
            });
        }
        if domain != previous_domain {
            self.emit_plugin_event(GanttEvent::DomainChanged {
                start: domain.start,
                end: domain.end,
                mode: report.mode,
            });
        }
        self.emit_plugin_event(GanttEvent::Redrawn {
            created: stats.created,
            updated: stats.updated,
            removed: stats.removed,
        });
        Ok(report)
    }
}
