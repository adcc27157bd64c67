use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{EntryKey, LaneScale, TimeDomain, TimeScale, WorkEntry};
use crate::error::GanttResult;

use super::{
    BarElement, BarGeometry, BarTransition, DomainTransition, HandleElement, LaneAxis, Scene,
    TimeAxis,
};

/// Borrowed inputs for one reconciliation pass.
#[derive(Debug, Clone, Copy)]
pub struct SyncInput<'a> {
    pub entries: &'a [WorkEntry],
    pub time_scale: &'a TimeScale,
    pub lane_scale: &'a LaneScale,
    pub tick_format: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReconcileStats {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Keeps the [`Scene`] consistent with the entry store and scales.
pub struct RenderSync;

impl RenderSync {
    /// Full keyed pass: entries only in the new data are created, elements
    /// whose key vanished are removed, matches are retargeted.
    ///
    /// All geometry is resolved before the scene is touched, so an error
    /// leaves the previous scene intact.
    pub fn reconcile(scene: &mut Scene, input: SyncInput<'_>) -> GanttResult<ReconcileStats> {
        let domain = input.time_scale.domain();
        let targets = input
            .entries
            .iter()
            .map(|entry| {
                input
                    .lane_scale
                    .band_for(entry)
                    .map(|band| bar_geometry(entry, input.time_scale, band.offset, band.height))
            })
            .collect::<GanttResult<Vec<_>>>()?;
        let time_axis = TimeAxis::build(
            input.time_scale,
            input.tick_format,
            input.lane_scale.height(),
        )?;

        let clock_ms = scene.clock_ms;
        let handle_width = scene.handle_width;
        let mut previous: Vec<Option<BarElement>> =
            std::mem::take(&mut scene.bars).into_iter().map(Some).collect();
        // Equal keys are matched in order of occurrence.
        let mut previous_by_key: IndexMap<EntryKey, Vec<usize>> = IndexMap::new();
        for (slot, element) in previous.iter().enumerate().rev() {
            if let Some(element) = element {
                previous_by_key
                    .entry(element.key.clone())
                    .or_default()
                    .push(slot);
            }
        }

        let mut stats = ReconcileStats::default();
        let mut seen_keys = IndexSet::new();
        let mut bars = Vec::with_capacity(input.entries.len());
        for (entry_index, (entry, target)) in input.entries.iter().zip(targets).enumerate() {
            let key = entry.key();
            if !seen_keys.insert(key.clone()) {
                warn!(
                    label = %entry.label,
                    entry_index,
                    "duplicate reconciliation key; matching by occurrence order"
                );
            }
            let (start_handle, end_handle) = handles(entry, target.width, domain, handle_width);

            let matched = previous_by_key
                .get_mut(&key)
                .and_then(Vec::pop)
                .and_then(|slot| previous.get_mut(slot).and_then(Option::take));
            let transition = match &matched {
                Some(element) => {
                    stats.updated += 1;
                    let displayed = element.displayed_geometry(clock_ms);
                    (displayed != target).then_some(BarTransition {
                        from: displayed,
                        started_at_ms: clock_ms,
                    })
                }
                None => {
                    stats.created += 1;
                    Some(BarTransition {
                        from: BarGeometry {
                            width: 0.0,
                            ..target
                        },
                        started_at_ms: clock_ms,
                    })
                }
            };

            bars.push(BarElement {
                key,
                entry_index,
                label: entry.label.clone(),
                color: entry.color,
                geometry: target,
                start_handle,
                end_handle,
                transition,
            });
        }
        stats.removed = previous.iter().filter(|slot| slot.is_some()).count();
        scene.bars = bars;

        Self::apply_axes(scene, time_axis, LaneAxis::build(input.lane_scale), domain)?;

        debug!(
            created = stats.created,
            updated = stats.updated,
            removed = stats.removed,
            "reconcile scene"
        );
        Ok(stats)
    }

    /// Local update after a committed drag tick: moves the body and handles of
    /// one bar immediately, without a full pass.
    ///
    /// The element's key follows the entry so the next full pass still
    /// matches it.
    pub fn reposition_entry(
        scene: &mut Scene,
        entry_index: usize,
        entry: &WorkEntry,
        time_scale: &TimeScale,
    ) -> bool {
        let handle_width = scene.handle_width;
        let Some(element) = scene.bar_mut(entry_index) else {
            return false;
        };

        let geometry = bar_geometry(
            entry,
            time_scale,
            element.geometry.y,
            element.geometry.height,
        );
        let (start_handle, end_handle) =
            handles(entry, geometry.width, time_scale.domain(), handle_width);
        element.geometry = geometry;
        element.start_handle = start_handle;
        element.end_handle = end_handle;
        element.transition = None;
        element.key = entry.key();
        true
    }

    fn apply_axes(
        scene: &mut Scene,
        time_axis: TimeAxis,
        lane_axis: LaneAxis,
        domain: TimeDomain,
    ) -> GanttResult<()> {
        let clock_ms = scene.clock_ms;
        if let Some(displayed) = scene.displayed_axis_domain(clock_ms)? {
            scene.axis_transition = (displayed != domain).then_some(DomainTransition {
                from: displayed,
                to: domain,
                started_at_ms: clock_ms,
            });
        }
        scene.axis_domain = Some(domain);
        scene.time_axis = time_axis;
        scene.lane_axis = lane_axis;
        Ok(())
    }
}

fn bar_geometry(entry: &WorkEntry, time_scale: &TimeScale, y: f64, height: f64) -> BarGeometry {
    let x = time_scale.time_to_pixel(entry.start_time);
    BarGeometry {
        x,
        y,
        width: time_scale.time_to_pixel(entry.end_time) - x,
        height,
    }
}

fn handles(
    entry: &WorkEntry,
    bar_width: f64,
    domain: TimeDomain,
    handle_width: f64,
) -> (HandleElement, HandleElement) {
    let start = HandleElement {
        offset_x: -handle_width / 2.0,
        width: handle_width,
        visible: domain.contains(entry.start_time),
    };
    let end = HandleElement {
        offset_x: -handle_width / 2.0 + bar_width,
        width: handle_width,
        visible: domain.contains(entry.end_time),
    };
    (start, end)
}
